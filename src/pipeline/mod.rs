//! Per-image work module
//!
//! Contains the blur filter stage and the item processor that loads,
//! filters and saves a single file.

pub mod filter;
pub mod processor;

pub use filter::{box_blur, BoxBlur};
pub use processor::{ItemProcessor, WorkItem};
