//! Wire types shared with the attendance API.
//!
//! Field names follow Rust conventions; serde renames map them onto the
//! Spanish names used by the backend.

pub mod attendance;
pub mod envelope;
pub mod group;
pub mod session;
pub mod student;
