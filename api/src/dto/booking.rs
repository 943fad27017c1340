//! Booking DTOs.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use sb_core::services::NewBooking;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub room_id: Uuid,

    pub check_in: NaiveDate,

    pub check_out: NaiveDate,

    #[validate(range(min = 1, max = 20, message = "At least one adult is required"))]
    pub adults_count: u32,

    #[validate(range(max = 20, message = "Too many children"))]
    pub children_count: u32,

    #[validate(range(max = 20, message = "Too many infants"))]
    pub infants_count: u32,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            room_id: req.room_id,
            check_in: req.check_in,
            check_out: req.check_out,
            adults_count: req.adults_count,
            children_count: req.children_count,
            infants_count: req.infants_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_at_least_one_adult() {
        let req = CreateBookingRequest {
            room_id: Uuid::new_v4(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            adults_count: 0,
            children_count: 1,
            infants_count: 0,
        };
        assert!(req.validate().is_err());
    }
}
