//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment configuration helpers
//! - Cryptographic utilities (SHA-256, SHA-1, constant-time compare, Base64)
//! - Outbound email over SMTP
//! - Image hosting (Cloudinary) and data-URI decoding

pub mod config;
pub mod crypto;
pub mod mail;
pub mod media;
