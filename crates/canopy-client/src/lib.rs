//! Canopy Client - HTTP adapter for the tree-detection backend
//!
//! Implements the `AnalysisBackend` port over the backend's multipart
//! endpoints with `reqwest`.

pub mod http;

pub use http::HttpAnalysisBackend;
