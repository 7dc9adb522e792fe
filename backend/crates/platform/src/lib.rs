//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64url, numeric codes)
//! - Bearer token extraction from request headers
//! - Provider-facing phone number formatting

pub mod bearer;
pub mod crypto;
pub mod phone;
