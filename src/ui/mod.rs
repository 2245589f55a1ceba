/// UI module
///
/// This module handles:
/// - The per-tile canvas renderer and its pan gesture (tile.rs)
/// - Shape mask geometry (mask.rs)

pub mod mask;
pub mod tile;
