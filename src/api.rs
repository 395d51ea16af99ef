use glam::Vec2;

use crate::sprite::Sprite;
use crate::tilemap::Tile;
use crate::types::{MapError, Rect};

/// Narrowphase primitive tests over axis-aligned rects.
pub trait NarrowphaseApi {
    /// Strict overlap test: the projections on both axes must intersect
    /// with positive measure, so rects that merely touch along an edge do
    /// not overlap. Symmetric in its arguments.
    fn overlap_rect_rect(a: &Rect, b: &Rect) -> bool;

    /// Minimum translation vector: the shortest single-axis displacement of
    /// `a` that ends its overlap with `b`. Equal-magnitude candidates
    /// resolve x before y, push-right before push-left, push-down before
    /// push-up.
    ///
    /// Precondition: `overlap_rect_rect(a, b)` is true. For disjoint rects
    /// the result is meaningless; callers test first.
    fn mtv_rect_rect(a: &Rect, b: &Rect) -> Vec2;
}

/// Public API contract for the static tile-grid collision layer.
pub trait TileMapApi {
    /// Construct an empty `rows` x `cols` grid of `tile_width` x
    /// `tile_height` cells, to be filled by `load`.
    fn new(rows: usize, cols: usize, tile_width: f32, tile_height: f32) -> Self
    where
        Self: Sized;

    // --- Construction ------------------------------------------------------

    /// Place tiles from text rows: each character in `tile_symbols` becomes
    /// a solid tile textured by the paired entry of `texture_indices`; any
    /// other character is an open cell. After placement, each tile side
    /// facing an open cell (or the grid boundary) gets a collision edge;
    /// sides shared by two tiles get none. Replaces any previously loaded
    /// data.
    fn load(
        &mut self,
        map_data: &[&str],
        tile_symbols: &[char],
        texture_indices: &[usize],
        tileset_len: usize,
    ) -> Result<(), MapError>;

    // --- Queries -----------------------------------------------------------

    /// Tile at the given cell, or `None` for open cells and out-of-range
    /// coordinates. Out-of-range lookups are routine (neighbor checks along
    /// the grid boundary), not errors.
    fn tile_at(&self, row: i32, col: i32) -> Option<&Tile>;

    /// World-space centers of every cell whose source character equals
    /// `symbol`, in row-major scan order. Reads the raw text grid, so it
    /// also finds marker characters that never became tiles.
    fn symbol_positions(&self, symbol: char) -> Vec<Vec2>;

    // --- Collision ---------------------------------------------------------

    /// True iff the sprite's boundary overlaps any tile's full boundary.
    /// Scans the tile list in insertion order, stopping at the first hit.
    fn check_sprite_overlap(&self, sprite: &Sprite) -> bool;

    /// Push the sprite out of every tile it overlaps, one tile at a time in
    /// list order, using only edges that face open space. If the sprite
    /// carries physics, the corrected axis's velocity and acceleration are
    /// zeroed.
    fn prevent_sprite_overlap(&self, sprite: &mut Sprite);
}
