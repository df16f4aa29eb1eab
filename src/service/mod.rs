//! Remote watermarking service
//!
//! The compositing happens on the server. This module only knows the
//! request/response contract: one multipart `POST` with the main image and
//! the logo, answered by the watermarked image.

mod client;
mod error;

pub use client::{ProcessedImage, WatermarkClient};
pub use error::ServiceError;
