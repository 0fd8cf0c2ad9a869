//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, HMAC signatures, Base64)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Outbound mail delivery
//! - Template rendering for server-side views

pub mod cookie;
pub mod crypto;
pub mod mail;
pub mod password;
pub mod view;
