//! Shared types for the TikTok OAuth workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
