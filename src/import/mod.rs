/// Contact photo import module
///
/// This module handles:
/// - Picking a photo with the native file dialog
/// - Copying the picked photo into the app's private images directory

pub mod image;
pub mod picker;

pub use image::{import_image_async, ImportError};
