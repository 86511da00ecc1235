//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific
//! business logic. Shared by the static file handler; the crawler only uses
//! hyper directly.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::resolve_range;
pub use response::{build_304_response, build_404_response, build_405_response, build_416_response};
