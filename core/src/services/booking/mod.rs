//! Booking lifecycle: creation, confirmation, cancellation and history.

mod service;

pub use service::{BookingService, NewBooking};
