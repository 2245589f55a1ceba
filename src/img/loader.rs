/// Background image decoding
///
/// Picked files are decoded off the UI thread, cover-cropped to a square
/// display resolution and turned into ready-to-draw handles. The original
/// files are never modified.

use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::image::Handle;
use image::imageops::FilterType;
use thiserror::Error;
use tokio::task;

use crate::state::data::LoadedImage;

/// Side length of the square display buffer each image is decoded to.
/// Large enough to stay sharp under the zoom floor of the tile size.
const DISPLAY_SIZE: u32 = 512;

/// File extensions offered by the picker dialog
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff"];

/// Why a single file failed to decode
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// What a finished decode batch looks like
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    /// Successfully decoded images, in input order
    pub images: Vec<LoadedImage>,
    /// Number of files that failed to decode
    pub failed: usize,
}

/// Decode a batch of picked files into display-ready images
///
/// Runs on a blocking task because decoding is CPU-intensive. Per-file
/// failures are counted and logged, never fatal: the rest of the batch
/// still loads.
pub async fn load_images(paths: Vec<PathBuf>) -> Result<LoadResult, String> {
    task::spawn_blocking(move || load_images_blocking(paths))
        .await
        .map_err(|e| format!("Task join error: {}", e))
}

/// Blocking implementation of batch decoding
fn load_images_blocking(paths: Vec<PathBuf>) -> LoadResult {
    let mut result = LoadResult::default();

    for path in paths {
        match load_one(&path) {
            Ok(image) => result.images.push(image),
            Err(e) => {
                log::warn!("{}", e);
                result.failed += 1;
            }
        }
    }

    log::info!(
        "Decoded {} images ({} failed)",
        result.images.len(),
        result.failed
    );

    result
}

/// Decode one file and resize it for display
fn load_one(path: &PathBuf) -> Result<LoadedImage, LoadError> {
    let decoded = image::open(path).map_err(|source| LoadError::Decode {
        path: path.clone(),
        source,
    })?;

    // Square cover crop so every tile has the same natural size
    let pixels = decoded
        .resize_to_fill(DISPLAY_SIZE, DISPLAY_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    let handle = Handle::from_rgba(pixels.width(), pixels.height(), pixels.as_raw().clone());

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    Ok(LoadedImage {
        filename,
        path: path.clone(),
        pixels: Arc::new(pixels),
        handle,
    })
}
