//! Registrant profile
//!
//! The fields collected at signup and copied onto the user record.

use chrono::NaiveDate;

use crate::domain::value_object::phone_number::PhoneNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone_no: PhoneNumber,
    pub gender: String,
    pub address: String,
    /// Date of birth
    pub dob: NaiveDate,
    pub blood_type: String,
}
