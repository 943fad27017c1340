//! Recording delivery gateway for OTP tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::services::otp::{DeliveryError, DeliveryGateway};

/// Records every dispatch and can be switched to fail email sends, to
/// exercise the fallback path.
#[derive(Default)]
pub struct MockDeliveryGateway {
    pub emails: Mutex<Vec<(String, String)>>,
    pub fallbacks: Mutex<Vec<(String, String)>>,
    fail_email: AtomicBool,
}

impl MockDeliveryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_email_sends(&self) {
        self.fail_email.store(true, Ordering::SeqCst);
    }

    pub fn email_count(&self) -> usize {
        self.emails.lock().unwrap().len()
    }

    pub fn fallback_count(&self) -> usize {
        self.fallbacks.lock().unwrap().len()
    }

    /// Code carried by the most recent dispatch on either channel.
    pub fn last_code(&self) -> Option<String> {
        let emails = self.emails.lock().unwrap();
        let fallbacks = self.fallbacks.lock().unwrap();
        emails
            .last()
            .or_else(|| fallbacks.last())
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl DeliveryGateway for MockDeliveryGateway {
    async fn send_email(&self, address: &str, code: &str) -> Result<(), DeliveryError> {
        if self.fail_email.load(Ordering::SeqCst) {
            return Err(DeliveryError::Email("smtp unavailable".to_string()));
        }
        self.emails
            .lock()
            .unwrap()
            .push((address.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_fallback(&self, contact: &str, code: &str) {
        self.fallbacks
            .lock()
            .unwrap()
            .push((contact.to_string(), code.to_string()));
    }
}
