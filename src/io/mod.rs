//! Filesystem operations module
//!
//! Contains folder reset and source enumeration used by the runners
//! and the harness.

pub mod folder;

pub use folder::{list_source_files, reset_folder};
