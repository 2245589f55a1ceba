/// The Gallery owns the ordered tile list and the global shape selection.
///
/// It is the single source of truth: every mutation of gallery state goes
/// through the operations here, so the view layer can react consistently.
/// All operations are synchronous and infallible; an id that is no longer
/// present (e.g. a stale drop event after a removal) is absorbed as a
/// silent no-op rather than surfaced as an error.

use std::collections::HashMap;

use chrono::Utc;
use iced::widget::image::Handle;

use super::data::{ImageEntry, ImageSource, LoadedImage, Shape};
use super::edit::{EditPatch, FilterPreset, TileEdit};

/// In-memory gallery state, created empty and discarded on exit
#[derive(Debug, Default)]
pub struct Gallery {
    /// Insertion order IS display order; there is no separate z-order
    entries: Vec<ImageEntry>,
    /// One silhouette for every tile
    shape: Shape,
}

impl Gallery {
    /// Create an empty gallery with the default shape
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in display order
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Look up one entry by id
    pub fn get(&self, id: i64) -> Option<&ImageEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The currently selected tile silhouette
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Append decoded images to the end of the gallery, preserving both the
    /// existing order and the input order. Each new entry gets a fresh id
    /// derived from the current Unix milliseconds plus its batch index,
    /// floored above every live id so two batches landing in the same
    /// millisecond still get unique ids.
    pub fn add_images(&mut self, loaded: Vec<LoadedImage>) {
        let stamp = Utc::now().timestamp_millis();
        let floor = self
            .entries
            .iter()
            .map(|entry| entry.id + 1)
            .max()
            .unwrap_or(0);
        let base = stamp.max(floor);

        for (index, image) in loaded.into_iter().enumerate() {
            self.entries.push(ImageEntry {
                id: base + index as i64,
                filename: image.filename,
                source: ImageSource {
                    path: image.path,
                    pixels: image.pixels,
                    handle: image.handle,
                },
                edit: TileEdit::default(),
                filtered: HashMap::new(),
            });
        }
    }

    /// Move the entry with `active_id` to the position currently held by
    /// `over_id`, shifting the entries in between. A single atomic move,
    /// not a swap. No-op when `over_id` is absent, equal to `active_id`,
    /// or when either id is not in the list.
    pub fn reorder(&mut self, active_id: i64, over_id: Option<i64>) {
        let Some(over_id) = over_id else { return };
        if over_id == active_id {
            return;
        }
        let Some(from) = self.entries.iter().position(|e| e.id == active_id) else {
            return;
        };
        let Some(to) = self.entries.iter().position(|e| e.id == over_id) else {
            return;
        };

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
    }

    /// Merge a partial change set into the matching entry's transforms.
    /// Entries with other ids are untouched; an unknown id is a no-op.
    pub fn update_image(&mut self, id: i64, patch: EditPatch) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            patch.apply(&mut entry.edit);
        }
    }

    /// Restore the matching entry's transforms to their defaults, leaving
    /// id and source untouched
    pub fn reset_image(&mut self, id: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.edit.reset();
        }
    }

    /// Delete one entry from the gallery
    pub fn remove_image(&mut self, id: i64) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Replace the global shape selection unconditionally
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    /// Record a background-rendered filter variant on the matching entry.
    /// Silent no-op if the entry was removed while the render was in
    /// flight.
    pub fn store_filtered(&mut self, id: i64, preset: FilterPreset, handle: Handle) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.filtered.insert(preset, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::edit::{MIN_SCALE, ROTATE_STEP, ZOOM_STEP};
    use cgmath::Vector2;
    use image::RgbaImage;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// A 1x1 decoded image, enough for exercising the store
    fn loaded(name: &str) -> LoadedImage {
        LoadedImage {
            filename: name.to_string(),
            path: PathBuf::from(format!("/photos/{name}")),
            pixels: Arc::new(RgbaImage::new(1, 1)),
            handle: Handle::from_rgba(1, 1, vec![0u8, 0, 0, 255]),
        }
    }

    fn gallery_of(names: &[&str]) -> Gallery {
        let mut gallery = Gallery::new();
        gallery.add_images(names.iter().map(|n| loaded(n)).collect());
        gallery
    }

    fn ids(gallery: &Gallery) -> Vec<i64> {
        gallery.entries().iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_add_appends_in_input_order_with_defaults() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg"]);
        gallery.add_images(vec![loaded("c.jpg"), loaded("d.jpg")]);

        let names: Vec<&str> = gallery
            .entries()
            .iter()
            .map(|e| e.filename.as_str())
            .collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);

        for entry in gallery.entries() {
            assert!(entry.edit.is_unedited());
            assert!(entry.filtered.is_empty());
        }
    }

    #[test]
    fn test_ids_unique_across_batches() {
        // Two batches in the same millisecond must not collide
        let mut gallery = gallery_of(&["a.jpg", "b.jpg", "c.jpg"]);
        gallery.add_images(vec![loaded("d.jpg"), loaded("e.jpg")]);

        let mut all = ids(&gallery);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_reorder_moves_to_target_position() {
        let mut gallery = gallery_of(&["a", "b", "c", "d"]);
        let before = ids(&gallery);

        // Drag "a" onto "c": a lands at c's former index
        gallery.reorder(before[0], Some(before[2]));
        assert_eq!(
            ids(&gallery),
            vec![before[1], before[2], before[0], before[3]]
        );

        // And back towards the front
        gallery.reorder(before[0], Some(before[1]));
        assert_eq!(
            ids(&gallery),
            vec![before[0], before[1], before[2], before[3]]
        );
    }

    #[test]
    fn test_reorder_preserves_length_and_elements() {
        let mut gallery = gallery_of(&["a", "b", "c", "d", "e"]);
        let before = ids(&gallery);

        gallery.reorder(before[3], Some(before[1]));

        let mut after = ids(&gallery);
        assert_eq!(after.len(), before.len());
        after.sort_unstable();
        let mut sorted = before.clone();
        sorted.sort_unstable();
        assert_eq!(after, sorted);
    }

    #[test]
    fn test_reorder_noops() {
        let mut gallery = gallery_of(&["a", "b", "c"]);
        let before = ids(&gallery);

        // Drop on self
        gallery.reorder(before[1], Some(before[1]));
        assert_eq!(ids(&gallery), before);

        // Drag cancelled (no target)
        gallery.reorder(before[0], None);
        assert_eq!(ids(&gallery), before);

        // Stale ids never corrupt the list
        gallery.reorder(-1, Some(before[0]));
        assert_eq!(ids(&gallery), before);
        gallery.reorder(before[0], Some(-1));
        assert_eq!(ids(&gallery), before);
    }

    #[test]
    fn test_update_only_touches_matching_entry() {
        let mut gallery = gallery_of(&["a", "b"]);
        let before = ids(&gallery);

        gallery.update_image(before[0], EditPatch::rotation(90.0));

        assert_eq!(gallery.get(before[0]).unwrap().edit.rotation, 90.0);
        assert!(gallery.get(before[1]).unwrap().edit.is_unedited());

        // Unknown id: nothing changes
        gallery.update_image(-1, EditPatch::rotation(45.0));
        assert_eq!(gallery.get(before[0]).unwrap().edit.rotation, 90.0);
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_identity() {
        let mut gallery = gallery_of(&["a"]);
        let id = ids(&gallery)[0];
        let path = gallery.get(id).unwrap().source.path.clone();

        gallery.update_image(id, EditPatch::rotation(105.0));
        gallery.update_image(id, EditPatch::filter(FilterPreset::Sepia));
        gallery.update_image(id, EditPatch::offset(Vector2::new(40.0, -12.5)));

        gallery.reset_image(id);

        let entry = gallery.get(id).unwrap();
        assert!(entry.edit.is_unedited());
        assert_eq!(entry.id, id);
        assert_eq!(entry.source.path, path);
    }

    #[test]
    fn test_zoom_out_floors_at_half() {
        let mut gallery = gallery_of(&["a"]);
        let id = ids(&gallery)[0];

        gallery.reset_image(id);
        for _ in 0..6 {
            let scale = gallery.get(id).unwrap().edit.scale;
            gallery.update_image(id, EditPatch::scale(scale - ZOOM_STEP));
        }

        assert_eq!(gallery.get(id).unwrap().edit.scale, MIN_SCALE);
    }

    #[test]
    fn test_shape_is_global() {
        let mut gallery = gallery_of(&["a", "b"]);
        assert_eq!(gallery.shape(), Shape::Hexagon);

        gallery.set_shape(Shape::Triangle);
        assert_eq!(gallery.shape(), Shape::Triangle);

        gallery.set_shape(Shape::Square);
        assert_eq!(gallery.shape(), Shape::Square);
    }

    #[test]
    fn test_remove_image() {
        let mut gallery = gallery_of(&["a", "b", "c"]);
        let before = ids(&gallery);

        gallery.remove_image(before[1]);
        assert_eq!(ids(&gallery), vec![before[0], before[2]]);

        // Already gone: no-op
        gallery.remove_image(before[1]);
        assert_eq!(gallery.len(), 2);
    }

    #[test]
    fn test_stale_filter_render_is_dropped() {
        let mut gallery = gallery_of(&["a"]);
        let id = ids(&gallery)[0];

        gallery.remove_image(id);
        gallery.store_filtered(id, FilterPreset::Sepia, Handle::from_rgba(1, 1, vec![0u8; 4]));

        assert!(gallery.is_empty());
    }

    #[test]
    fn test_upload_reorder_edit_reset_scenario() {
        // Upload two files
        let mut gallery = gallery_of(&["first.jpg", "second.jpg"]);
        assert_eq!(gallery.len(), 2);
        let before = ids(&gallery);
        assert_ne!(before[0], before[1]);

        // Drag the first tile onto the second: order reverses
        gallery.reorder(before[0], Some(before[1]));
        assert_eq!(ids(&gallery), vec![before[1], before[0]]);

        // Rotate the tile now at index 0 three times
        let target = ids(&gallery)[0];
        for _ in 0..3 {
            let rotation = gallery.get(target).unwrap().edit.rotation;
            gallery.update_image(target, EditPatch::rotation(rotation + ROTATE_STEP));
        }
        assert_eq!(gallery.get(target).unwrap().edit.rotation, 45.0);

        // Sepia then gray: last write wins
        gallery.update_image(target, EditPatch::filter(FilterPreset::Sepia));
        gallery.update_image(target, EditPatch::filter(FilterPreset::Grayscale));
        assert_eq!(
            gallery.get(target).unwrap().edit.filter,
            FilterPreset::Grayscale
        );

        // Reset returns everything except id/source to defaults
        gallery.reset_image(target);
        let entry = gallery.get(target).unwrap();
        assert!(entry.edit.is_unedited());
        assert_eq!(entry.id, target);
    }
}
