/// Shared data structures for the application state
///
/// These structs represent the data model that flows between the decode
/// layer, the gallery store and the UI layer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::image::Handle;
use image::RgbaImage;

use super::edit::{FilterPreset, TileEdit};

/// The clipping silhouette applied to every tile. Global, not per-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Hexagon,
    Circle,
    Triangle,
    /// No clipping applied
    Square,
}

impl Shape {
    /// All selectable shapes, in toolbar order
    pub const ALL: [Shape; 4] = [Shape::Hexagon, Shape::Circle, Shape::Triangle, Shape::Square];
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Shape::Hexagon => "Hexagon",
            Shape::Circle => "Circle",
            Shape::Triangle => "Triangle",
            Shape::Square => "Square",
        })
    }
}

/// A decoded image ready to become a gallery entry
///
/// Produced by the background decode task. Pixels are kept at display
/// resolution and shared via `Arc` so messages stay cheap to clone.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Filename only (e.g. "IMG_0412.jpg"), shown on the tile header
    pub filename: String,
    /// Full path the image was decoded from
    pub path: PathBuf,
    /// Display-resolution RGBA pixels, retained for filter rendering
    pub pixels: Arc<RgbaImage>,
    /// Ready-to-draw handle for the unfiltered image
    pub handle: Handle,
}

/// Where a tile's image came from and what it looks like
#[derive(Debug, Clone)]
pub struct ImageSource {
    /// Full path to the original file
    pub path: PathBuf,
    /// Display-resolution RGBA pixels, input for filter rendering
    pub pixels: Arc<RgbaImage>,
    /// Unfiltered display handle
    pub handle: Handle,
}

/// Represents a single tile in the gallery
#[derive(Debug, Clone)]
pub struct ImageEntry {
    /// Unique id, stable for the entry's lifetime. Doubles as the drag key.
    pub id: i64,
    /// Filename only, shown on the tile header
    pub filename: String,
    /// The decoded image this tile displays
    pub source: ImageSource,
    /// Current transform state
    pub edit: TileEdit,
    /// Background-rendered filter variants, keyed by preset
    pub filtered: HashMap<FilterPreset, Handle>,
}

impl ImageEntry {
    /// The handle to draw right now: the cached variant for the active
    /// filter, or the unfiltered image while a render is still in flight.
    pub fn display_handle(&self) -> Handle {
        self.filtered
            .get(&self.edit.filter)
            .cloned()
            .unwrap_or_else(|| self.source.handle.clone())
    }

    /// Whether the active filter still needs a background render
    pub fn needs_filter_render(&self) -> bool {
        self.edit.filter != FilterPreset::None && !self.filtered.contains_key(&self.edit.filter)
    }
}
