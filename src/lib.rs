//! Snapshot a show-tracker API into a directory tree and serve it back.
//!
//! The two halves share exactly one convention, the self-file layout in
//! [`layout`]: the crawler stores each response body byte-for-byte under its
//! URL path, and the server rewrites any request that names a directory to
//! the self-file inside it.

pub mod config;
pub mod crawler;
pub mod handler;
pub mod http;
pub mod layout;
pub mod logger;
pub mod server;
