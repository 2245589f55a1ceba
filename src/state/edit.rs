/// Per-tile edit parameters
///
/// This struct stores all transforms applied to one tile's image. Edits are
/// non-destructive: the decoded pixels are never touched, the values here
/// are applied at draw time (and filter presets as cached pixel variants).

use cgmath::Vector2;

/// Rotation applied per click of the rotate button, in degrees
pub const ROTATE_STEP: f32 = 15.0;

/// Scale applied per click of the zoom buttons (and per wheel line)
pub const ZOOM_STEP: f32 = 0.1;

/// Lower bound for the zoom factor. There is no upper bound.
pub const MIN_SCALE: f32 = 0.5;

/// Named color-filter presets, mutually exclusive per tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterPreset {
    /// Unfiltered image
    #[default]
    None,
    /// Rec. 709 luma grayscale
    Grayscale,
    /// Classic sepia tone matrix
    Sepia,
    /// RGB multiplied by 1.2
    Brighten,
}

/// All transform parameters for one tile
///
/// These values are applied to the tile's image layer in a fixed order:
/// translate by `offset`, rotate by `rotation`, scale by `scale`, all about
/// the tile center, then the active `filter` preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileEdit {
    /// Rotation in degrees. Accumulates in `ROTATE_STEP` increments and is
    /// deliberately unbounded: it can pass 360 or go negative indefinitely.
    pub rotation: f32,

    /// Zoom factor. Always `>= MIN_SCALE`, no upper clamp.
    pub scale: f32,

    /// Active color filter. Last applied wins.
    pub filter: FilterPreset,

    /// Pan offset in logical pixels relative to the tile's natural position.
    /// Accumulates additively during a drag gesture.
    pub offset: Vector2<f32>,
}

impl Default for TileEdit {
    /// Create default edit parameters (no transforms)
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
            filter: FilterPreset::None,
            offset: Vector2::new(0.0, 0.0),
        }
    }
}

impl TileEdit {
    /// Check if this represents an untouched tile (all values at default)
    pub fn is_unedited(&self) -> bool {
        *self == Self::default()
    }

    /// Reset all transforms to default
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A partial change set for one tile's `TileEdit`
///
/// Fields left as `None` are untouched by `apply`, so an empty patch is a
/// no-op. Every edit mutation goes through a patch, which keeps the
/// `scale >= MIN_SCALE` invariant in one place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EditPatch {
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub filter: Option<FilterPreset>,
    pub offset: Option<Vector2<f32>>,
}

impl EditPatch {
    pub fn rotation(value: f32) -> Self {
        Self {
            rotation: Some(value),
            ..Self::default()
        }
    }

    pub fn scale(value: f32) -> Self {
        Self {
            scale: Some(value),
            ..Self::default()
        }
    }

    pub fn filter(value: FilterPreset) -> Self {
        Self {
            filter: Some(value),
            ..Self::default()
        }
    }

    pub fn offset(value: Vector2<f32>) -> Self {
        Self {
            offset: Some(value),
            ..Self::default()
        }
    }

    /// Merge this patch into `edit`. Unset fields are unchanged; the scale
    /// floor is enforced on every apply, not just the zoom-out path.
    pub fn apply(self, edit: &mut TileEdit) {
        if let Some(rotation) = self.rotation {
            edit.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            edit.scale = scale.max(MIN_SCALE);
        }
        if let Some(filter) = self.filter {
            edit.filter = filter;
        }
        if let Some(offset) = self.offset {
            edit.offset = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unedited() {
        let edit = TileEdit::default();
        assert!(edit.is_unedited());
        assert_eq!(edit.rotation, 0.0);
        assert_eq!(edit.scale, 1.0);
        assert_eq!(edit.filter, FilterPreset::None);
        assert_eq!(edit.offset, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut edit = TileEdit::default();
        edit.rotation = 45.0;
        edit.filter = FilterPreset::Sepia;
        edit.offset = Vector2::new(12.0, -3.0);

        assert!(!edit.is_unedited());

        edit.reset();

        assert!(edit.is_unedited());
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut edit = TileEdit::default();
        edit.rotation = 30.0;
        edit.offset = Vector2::new(5.0, 5.0);

        EditPatch::filter(FilterPreset::Grayscale).apply(&mut edit);

        // Untouched fields survive the merge
        assert_eq!(edit.rotation, 30.0);
        assert_eq!(edit.offset, Vector2::new(5.0, 5.0));
        assert_eq!(edit.filter, FilterPreset::Grayscale);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut edit = TileEdit::default();
        edit.rotation = 75.0;
        edit.scale = 2.3;

        let before = edit;
        EditPatch::default().apply(&mut edit);

        assert_eq!(edit, before);
    }

    #[test]
    fn test_scale_floor_holds_for_any_patch() {
        let mut edit = TileEdit::default();

        EditPatch::scale(-4.0).apply(&mut edit);
        assert_eq!(edit.scale, MIN_SCALE);

        EditPatch::scale(0.49).apply(&mut edit);
        assert_eq!(edit.scale, MIN_SCALE);

        // No upper clamp
        EditPatch::scale(9.0).apply(&mut edit);
        assert_eq!(edit.scale, 9.0);
    }

    #[test]
    fn test_rotation_is_unbounded() {
        let mut edit = TileEdit::default();
        for _ in 0..30 {
            EditPatch::rotation(edit.rotation + ROTATE_STEP).apply(&mut edit);
        }
        // 30 clicks of 15 degrees: past a full turn, never normalized
        assert_eq!(edit.rotation, 450.0);
    }
}
