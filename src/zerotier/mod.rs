// ZeroTier Central API module
// Public interface for remote network and member data

mod client;
mod types;

pub use client::{ApiError, ZeroTier, DEFAULT_BASE_URL};
pub use types::{Member, Network};
