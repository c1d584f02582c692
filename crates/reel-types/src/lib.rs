//! Reel Types - Shared schema definitions
//!
//! Entity records, insert/patch payloads, validation and the API response
//! envelope. Pure data types with no async runtime dependencies, so the same
//! definitions can be compiled for the client.

pub mod comment;
pub mod notification;
pub mod response;
pub mod user;
pub mod validation;
pub mod video;

pub use comment::*;
pub use notification::*;
pub use response::*;
pub use user::*;
pub use validation::*;
pub use video::*;

/// Generate a new record identifier.
///
/// UUID v7 keeps identifiers roughly time-ordered, which makes logs easier
/// to follow.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
