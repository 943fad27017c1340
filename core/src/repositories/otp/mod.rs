mod mock;
mod repository;

pub use mock::MockOtpRepository;
pub use repository::OtpRepository;
