//! Value Object Module

pub mod exchange;

pub use kernel::id::{ProductId, UserId};
