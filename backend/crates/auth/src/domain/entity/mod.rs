//! Entity Module

pub mod pending_registrant;
pub mod profile;
pub mod user;
