//! Image processing.
//!
//! - [`cover`]: square JPEG covers for podcast pages

pub mod cover;
