//! Tests for the OTP lifecycle.

mod mocks;
mod service_tests;
