//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Turn CLI input into core types
//! 2. Call the service or runtime adapter
//! 3. Format output for the terminal

pub mod exec;
pub mod flatten;
pub mod gpu;
pub mod watermark;
