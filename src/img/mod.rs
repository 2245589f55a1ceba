/// Image decoding module
///
/// This module handles:
/// - Decoding picked files on a background task
/// - Cover-cropping to display resolution
/// - Rendering the color-filter preset variants

pub mod filters;
pub mod loader;
