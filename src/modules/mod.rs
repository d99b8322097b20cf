//! Modules layer - Infrastructure components for external integrations
//!
//! Currently holds the file storage backends.

pub mod storage;
