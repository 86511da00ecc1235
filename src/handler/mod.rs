//! Request handler module
//!
//! Responsible for request routing dispatch and snapshot serving: method
//! validation, the directory-to-self-file rewrite, and static file responses.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, ServeContext};
