/// State management module
///
/// This module handles all application state, including:
/// - The gallery store owning the tile list and shape selection (gallery.rs)
/// - Shared data structures (data.rs)
/// - Per-tile transform parameters and patch merging (edit.rs)

pub mod data;
pub mod edit;
pub mod gallery;
