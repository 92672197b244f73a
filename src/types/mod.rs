//! Shared API types.

mod response;

pub use response::{ApiResponse, MessageResponse};
