//! Resource providers for the radar print pipeline.
//!
//! This crate provides platform-specific implementations of the
//! `ResourceProvider` trait from radar-print-traits.
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads resources from a local directory
//! - [`HttpResourceProvider`]: Fetches resources relative to a base URL
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory provider from radar-print-traits:
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage

mod filesystem;
mod http;

pub use filesystem::FilesystemResourceProvider;
pub use http::HttpResourceProvider;

// Re-export the in-memory provider from radar-print-traits for convenience
pub use radar_print_traits::InMemoryResourceProvider;
