/// Color-filter preset rendering
///
/// Each preset is a plain per-pixel transform over the retained RGBA
/// buffer. Variants are rendered once per (tile, preset) on a background
/// task and cached, so switching back to an already-rendered preset is
/// instant.

use std::sync::Arc;

use iced::widget::image::Handle;
use image::RgbaImage;
use tokio::task;

use crate::state::edit::FilterPreset;

/// Brightness multiplier for the Brighten preset
const BRIGHTEN_FACTOR: f32 = 1.2;

/// Render one preset variant and hand back a drawable handle
///
/// Runs on a blocking task; the result message carries the (id, preset)
/// pair so a stale render for a removed tile can be dropped by the store.
pub async fn render(id: i64, preset: FilterPreset, pixels: Arc<RgbaImage>) -> (i64, FilterPreset, Handle) {
    let rendered = task::spawn_blocking(move || apply(preset, &pixels))
        .await
        .unwrap_or_else(|_| RgbaImage::new(1, 1));

    let handle = Handle::from_rgba(rendered.width(), rendered.height(), rendered.into_raw());
    (id, preset, handle)
}

/// Apply a preset to an RGBA buffer. Alpha is always preserved.
pub fn apply(preset: FilterPreset, source: &RgbaImage) -> RgbaImage {
    match preset {
        FilterPreset::None => source.clone(),
        FilterPreset::Grayscale => pixel_transform(source, |r, g, b| {
            // Rec. 709 luma weights
            let v = 0.2126 * r + 0.7152 * g + 0.0722 * b;
            (v, v, v)
        }),
        FilterPreset::Sepia => pixel_transform(source, |r, g, b| {
            let sr = 0.393 * r + 0.769 * g + 0.189 * b;
            let sg = 0.349 * r + 0.686 * g + 0.168 * b;
            let sb = 0.272 * r + 0.534 * g + 0.131 * b;
            (sr, sg, sb)
        }),
        FilterPreset::Brighten => pixel_transform(source, |r, g, b| {
            (r * BRIGHTEN_FACTOR, g * BRIGHTEN_FACTOR, b * BRIGHTEN_FACTOR)
        }),
    }
}

/// Run a color transform over every pixel, clamping back to 0..=255
fn pixel_transform(source: &RgbaImage, transform: impl Fn(f32, f32, f32) -> (f32, f32, f32)) -> RgbaImage {
    let mut out = source.clone();

    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let (nr, ng, nb) = transform(r as f32, g as f32, b as f32);
        pixel.0 = [
            nr.round().clamp(0.0, 255.0) as u8,
            ng.round().clamp(0.0, 255.0) as u8,
            nb.round().clamp(0.0, 255.0) as u8,
            a,
        ];
    }

    out
}
