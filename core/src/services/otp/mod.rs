//! OTP issuance, verification and expiry.
//!
//! The state machine lives in [`service::OtpService`]; the seams it
//! depends on (delivery channel, time source) are traits so the timing
//! and failover behavior can be exercised in tests.

mod clock;
mod service;
mod traits;

pub use clock::{Clock, FixedClock, SystemClock};
pub use service::OtpService;
pub use traits::{DeliveryError, DeliveryGateway};

#[cfg(test)]
mod tests;
