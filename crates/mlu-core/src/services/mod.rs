//! Core services built on the ports.

pub mod watermark;

pub use watermark::{Watermark, WatermarkService};
