use glam::Vec2;
use log::debug;

use crate::api::{NarrowphaseApi, TileMapApi};
use crate::narrowphase::Narrowphase;
use crate::sprite::Sprite;
use crate::types::{MapError, Rect};

/// A solid cell of the grid. Immutable once the load pass finishes.
///
/// Each `edge_*` is a zero-thickness rect flush with that side, present
/// only when the neighboring cell holds no tile. Sides shared by two
/// adjacent tiles carry no edge, so the seam between flush tiles never
/// contributes a correction.
#[derive(Clone, Debug)]
pub struct Tile {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub texture_index: usize,
    pub boundary: Rect,
    pub edge_left: Option<Rect>,
    pub edge_right: Option<Rect>,
    pub edge_top: Option<Rect>,
    pub edge_bottom: Option<Rect>,
}

impl Tile {
    fn new(center: Vec2, width: f32, height: f32, texture_index: usize) -> Self {
        Self {
            center,
            width,
            height,
            texture_index,
            boundary: Rect::from_center(center, Vec2::new(width, height)),
            edge_left: None,
            edge_right: None,
            edge_top: None,
            edge_bottom: None,
        }
    }
}

/// Static tile-grid terrain built from text rows.
///
/// Built once at level load, read-only afterward. Holds the full symbol
/// grid (markers included), a per-cell tile slot, and a flat tile list in
/// placement order for collision scans.
pub struct TileMap {
    pub rows: usize,
    pub cols: usize,
    pub tile_width: f32,
    pub tile_height: f32,

    // Every source character, row-major
    data_grid: Vec<char>,
    // Index into `tiles` per cell, row-major
    tile_grid: Vec<Option<usize>>,
    // All placed tiles, in row-major placement order
    tiles: Vec<Tile>,
}

impl TileMap {
    /// All placed tiles in placement order (the collision scan order).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_width,
            (row as f32 + 0.5) * self.tile_height,
        )
    }

    fn validate(
        &self,
        map_data: &[&str],
        tile_symbols: &[char],
        texture_indices: &[usize],
        tileset_len: usize,
    ) -> Result<(), MapError> {
        if tile_symbols.len() != texture_indices.len() {
            return Err(MapError::SymbolIndexMismatch {
                symbols: tile_symbols.len(),
                indices: texture_indices.len(),
            });
        }
        if map_data.len() != self.rows {
            return Err(MapError::RowCountMismatch {
                expected: self.rows,
                found: map_data.len(),
            });
        }
        for (row, line) in map_data.iter().enumerate() {
            let found = line.chars().count();
            if found != self.cols {
                return Err(MapError::RowLengthMismatch {
                    row,
                    expected: self.cols,
                    found,
                });
            }
        }
        for (&symbol, &index) in tile_symbols.iter().zip(texture_indices) {
            if index >= tileset_len {
                return Err(MapError::TextureIndexOutOfRange {
                    symbol,
                    index,
                    tileset_len,
                });
            }
        }
        Ok(())
    }
}

impl TileMapApi for TileMap {
    fn new(rows: usize, cols: usize, tile_width: f32, tile_height: f32) -> Self {
        Self {
            rows,
            cols,
            tile_width,
            tile_height,
            data_grid: Vec::new(),
            tile_grid: Vec::new(),
            tiles: Vec::new(),
        }
    }

    fn load(
        &mut self,
        map_data: &[&str],
        tile_symbols: &[char],
        texture_indices: &[usize],
        tileset_len: usize,
    ) -> Result<(), MapError> {
        self.validate(map_data, tile_symbols, texture_indices, tileset_len)?;

        self.data_grid.clear();
        self.tile_grid.clear();
        self.tiles.clear();

        for (r, line) in map_data.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                self.data_grid.push(ch);
                let slot = tile_symbols.iter().position(|&s| s == ch).map(|i| {
                    let tile = Tile::new(
                        self.cell_center(r, c),
                        self.tile_width,
                        self.tile_height,
                        texture_indices[i],
                    );
                    self.tiles.push(tile);
                    self.tiles.len() - 1
                });
                self.tile_grid.push(slot);
            }
        }

        // Edge pass: a side gets a collision edge only when nothing is
        // flush against it in the neighboring cell.
        for r in 0..self.rows as i32 {
            for c in 0..self.cols as i32 {
                let Some(slot) = self.tile_grid[r as usize * self.cols + c as usize] else {
                    continue;
                };
                let open_left = self.tile_at(r, c - 1).is_none();
                let open_right = self.tile_at(r, c + 1).is_none();
                let open_top = self.tile_at(r - 1, c).is_none();
                let open_bottom = self.tile_at(r + 1, c).is_none();

                let (tw, th) = (self.tile_width, self.tile_height);
                let tile = &mut self.tiles[slot];
                let b = tile.boundary;
                if open_left {
                    tile.edge_left = Some(Rect::new(b.left, b.top, 0.0, th));
                }
                if open_right {
                    tile.edge_right = Some(Rect::new(b.right(), b.top, 0.0, th));
                }
                if open_top {
                    tile.edge_top = Some(Rect::new(b.left, b.top, tw, 0.0));
                }
                if open_bottom {
                    tile.edge_bottom = Some(Rect::new(b.left, b.bottom(), tw, 0.0));
                }
            }
        }

        debug!(
            "loaded tile map: {} tiles in {}x{} grid",
            self.tiles.len(),
            self.rows,
            self.cols
        );
        Ok(())
    }

    fn tile_at(&self, row: i32, col: i32) -> Option<&Tile> {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return None;
        }
        self.tile_grid
            .get(row as usize * self.cols + col as usize)
            .copied()
            .flatten()
            .map(|i| &self.tiles[i])
    }

    fn symbol_positions(&self, symbol: char) -> Vec<Vec2> {
        let mut positions = Vec::new();
        for (i, &ch) in self.data_grid.iter().enumerate() {
            if ch == symbol {
                positions.push(self.cell_center(i / self.cols, i % self.cols));
            }
        }
        positions
    }

    fn check_sprite_overlap(&self, sprite: &Sprite) -> bool {
        let boundary = sprite.boundary();
        self.tiles
            .iter()
            .any(|t| Narrowphase::overlap_rect_rect(&boundary, &t.boundary))
    }

    fn prevent_sprite_overlap(&self, sprite: &mut Sprite) {
        for tile in &self.tiles {
            let boundary = sprite.boundary();
            if !Narrowphase::overlap_rect_rect(&boundary, &tile.boundary) {
                continue;
            }

            // One candidate per side whose edge faces open space and is
            // actually crossed by the sprite, collected left/right/top/bottom.
            let mut differences: Vec<Vec2> = Vec::with_capacity(4);
            if let Some(edge) = &tile.edge_left {
                if Narrowphase::overlap_rect_rect(&boundary, edge) {
                    differences.push(Vec2::new(tile.boundary.left - boundary.right(), 0.0));
                }
            }
            if let Some(edge) = &tile.edge_right {
                if Narrowphase::overlap_rect_rect(&boundary, edge) {
                    differences.push(Vec2::new(tile.boundary.right() - boundary.left, 0.0));
                }
            }
            if let Some(edge) = &tile.edge_top {
                if Narrowphase::overlap_rect_rect(&boundary, edge) {
                    differences.push(Vec2::new(0.0, tile.boundary.top - boundary.bottom()));
                }
            }
            if let Some(edge) = &tile.edge_bottom {
                if Narrowphase::overlap_rect_rect(&boundary, edge) {
                    differences.push(Vec2::new(0.0, tile.boundary.bottom() - boundary.top));
                }
            }

            // Overlap reached only through suppressed interior edges: no
            // correction, the sprite is crossing a seam between flush tiles.
            if differences.is_empty() {
                continue;
            }

            // Stable sort keeps the earliest candidate on ties (x before y).
            differences.sort_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));
            let mtv = differences[0];
            sprite.position += mtv;

            // Stop motion into the obstacle; tangential motion survives.
            if let Some(physics) = sprite.physics.as_mut() {
                if mtv.x != 0.0 {
                    physics.velocity.x = 0.0;
                    physics.acceleration.x = 0.0;
                }
                if mtv.y != 0.0 {
                    physics.velocity.y = 0.0;
                    physics.acceleration.y = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Physics;

    fn loaded(map_data: &[&str], rows: usize, cols: usize) -> TileMap {
        let mut map = TileMap::new(rows, cols, 10.0, 10.0);
        map.load(map_data, &['W'], &[0], 8).unwrap();
        map
    }

    // --- Construction ------------------------------------------------------

    #[test]
    fn test_load_places_tiles_at_cell_centers() {
        let map = loaded(&["W.", ".W"], 2, 2);
        assert_eq!(map.tiles().len(), 2);
        assert_eq!(map.tiles()[0].center, Vec2::new(5.0, 5.0));
        assert_eq!(map.tiles()[1].center, Vec2::new(15.0, 15.0));
        assert_eq!(map.tiles()[0].boundary, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(map.tiles()[0].texture_index, 0);
    }

    #[test]
    fn test_load_rejects_mismatched_symbol_lists() {
        let mut map = TileMap::new(1, 2, 10.0, 10.0);
        let err = map.load(&["WW"], &['W', 'D'], &[0], 8).unwrap_err();
        assert_eq!(
            err,
            MapError::SymbolIndexMismatch {
                symbols: 2,
                indices: 1
            }
        );
    }

    #[test]
    fn test_load_rejects_bad_grid_shape() {
        let mut map = TileMap::new(2, 2, 10.0, 10.0);
        let err = map.load(&["WW"], &['W'], &[0], 8).unwrap_err();
        assert_eq!(
            err,
            MapError::RowCountMismatch {
                expected: 2,
                found: 1
            }
        );
        let err = map.load(&["WW", "WWW"], &['W'], &[0], 8).unwrap_err();
        assert_eq!(
            err,
            MapError::RowLengthMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_load_rejects_texture_index_past_tileset() {
        let mut map = TileMap::new(1, 2, 10.0, 10.0);
        let err = map.load(&["WW"], &['W'], &[8], 8).unwrap_err();
        assert_eq!(
            err,
            MapError::TextureIndexOutOfRange {
                symbol: 'W',
                index: 8,
                tileset_len: 8
            }
        );
    }

    #[test]
    fn test_reload_replaces_previous_data() {
        let mut map = TileMap::new(1, 2, 10.0, 10.0);
        map.load(&["WW"], &['W'], &[0], 8).unwrap();
        assert_eq!(map.tiles().len(), 2);
        map.load(&["W."], &['W'], &[0], 8).unwrap();
        assert_eq!(map.tiles().len(), 1);
        assert!(map.tile_at(0, 1).is_none());
    }

    // --- Queries -----------------------------------------------------------

    #[test]
    fn test_tile_at_bounds() {
        let map = loaded(&["W.", ".W"], 2, 2);
        assert!(map.tile_at(0, 0).is_some());
        assert!(map.tile_at(0, 1).is_none());
        assert!(map.tile_at(-1, 0).is_none());
        assert!(map.tile_at(0, -1).is_none());
        assert!(map.tile_at(2, 0).is_none());
        assert!(map.tile_at(0, 2).is_none());
    }

    #[test]
    fn test_tile_at_before_load() {
        let map = TileMap::new(2, 2, 10.0, 10.0);
        assert!(map.tile_at(0, 0).is_none());
    }

    #[test]
    fn test_symbol_positions_world_centers() {
        let mut map = TileMap::new(3, 4, 16.0, 16.0);
        map.load(&["WWWW", "W..W", "WWWP"], &['W'], &[0], 8).unwrap();
        let positions = map.symbol_positions('P');
        assert_eq!(positions, vec![Vec2::new(3.5 * 16.0, 2.5 * 16.0)]);
        assert_eq!(positions[0], Vec2::new(56.0, 40.0));
        // markers never become tiles
        assert!(map.tile_at(2, 3).is_none());
    }

    #[test]
    fn test_symbol_positions_row_major_order() {
        let mut map = TileMap::new(2, 2, 10.0, 10.0);
        map.load(&["E.", ".E"], &['W'], &[0], 8).unwrap();
        let positions = map.symbol_positions('E');
        assert_eq!(positions, vec![Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0)]);
    }

    // --- Edge pass ---------------------------------------------------------

    #[test]
    fn test_adjacent_tiles_suppress_shared_edges() {
        let map = loaded(&["WW"], 1, 2);
        let left = map.tile_at(0, 0).unwrap();
        let right = map.tile_at(0, 1).unwrap();
        assert!(left.edge_right.is_none());
        assert!(right.edge_left.is_none());
        // the outward-facing sides keep their edges
        assert!(left.edge_left.is_some());
        assert!(right.edge_right.is_some());
        assert!(left.edge_top.is_some() && left.edge_bottom.is_some());
    }

    #[test]
    fn test_isolated_tile_has_all_edges() {
        let map = loaded(&["W"], 1, 1);
        let tile = map.tile_at(0, 0).unwrap();
        assert_eq!(tile.edge_left, Some(Rect::new(0.0, 0.0, 0.0, 10.0)));
        assert_eq!(tile.edge_right, Some(Rect::new(10.0, 0.0, 0.0, 10.0)));
        assert_eq!(tile.edge_top, Some(Rect::new(0.0, 0.0, 10.0, 0.0)));
        assert_eq!(tile.edge_bottom, Some(Rect::new(0.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_corner_grid_edge_layout() {
        // WW
        // W.
        let map = loaded(&["WW", "W."], 2, 2);
        let t00 = map.tile_at(0, 0).unwrap();
        assert!(t00.edge_left.is_some());
        assert!(t00.edge_top.is_some());
        assert!(t00.edge_right.is_none());
        assert!(t00.edge_bottom.is_none());
        let t01 = map.tile_at(0, 1).unwrap();
        assert!(t01.edge_left.is_none());
        assert!(t01.edge_right.is_some());
        assert!(t01.edge_top.is_some());
        assert!(t01.edge_bottom.is_some());
    }

    // --- Collision ---------------------------------------------------------

    #[test]
    fn test_check_sprite_overlap() {
        let map = loaded(&["W."], 1, 2);
        let inside = Sprite::new(5.0, 5.0, 4.0, 4.0);
        assert!(map.check_sprite_overlap(&inside));
        let outside = Sprite::new(15.0, 5.0, 4.0, 4.0);
        assert!(!map.check_sprite_overlap(&outside));
        // flush contact is not overlap
        let touching = Sprite::new(12.0, 5.0, 4.0, 4.0);
        assert!(!map.check_sprite_overlap(&touching));
    }

    #[test]
    fn test_resolve_opposes_approach_from_all_sides() {
        let map = loaded(&["W"], 1, 1);
        // (start center, expected resolved center): 1 unit deep each time,
        // pushed back out the side it came from
        let cases = [
            (Vec2::new(-1.0, 5.0), Vec2::new(-2.0, 5.0)),
            (Vec2::new(11.0, 5.0), Vec2::new(12.0, 5.0)),
            (Vec2::new(5.0, -1.0), Vec2::new(5.0, -2.0)),
            (Vec2::new(5.0, 11.0), Vec2::new(5.0, 12.0)),
        ];
        for (start, expected) in cases {
            let mut sprite = Sprite::new(start.x, start.y, 4.0, 4.0);
            map.prevent_sprite_overlap(&mut sprite);
            assert_eq!(sprite.position, expected);
            assert!(!map.check_sprite_overlap(&sprite));
        }
    }

    #[test]
    fn test_resolve_slides_over_interior_seam() {
        // Floor run of two tiles; a sprite rides their top edge while
        // straddling the vertical seam at x=10.
        let map = loaded(&["WW"], 1, 2);
        let mut sprite = Sprite::new(10.0, 0.0, 4.0, 4.0);
        map.prevent_sprite_overlap(&mut sprite);
        // pushed straight up, never sideways: the seam edges are suppressed
        assert_eq!(sprite.position, Vec2::new(10.0, -2.0));
    }

    #[test]
    fn test_resolve_ignores_overlap_without_open_edges() {
        // Fully embedded in the seam region, crossing no open edge: both
        // tiles overlap but neither contributes a candidate.
        let map = loaded(&["WW"], 1, 2);
        let mut sprite = Sprite::new(10.0, 5.0, 4.0, 4.0);
        assert!(map.check_sprite_overlap(&sprite));
        map.prevent_sprite_overlap(&mut sprite);
        assert_eq!(sprite.position, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_resolve_picks_smallest_open_candidate() {
        // WW
        // W.
        // Sprite straddles tile (0,0)'s left and top edges, deeper through
        // the top: the shallower push-left wins.
        let map = loaded(&["WW", "W."], 2, 2);
        let mut sprite = Sprite::new(2.0, 3.0, 6.0, 8.0);
        map.prevent_sprite_overlap(&mut sprite);
        assert_eq!(sprite.position, Vec2::new(-3.0, 3.0));
    }

    #[test]
    fn test_resolve_tie_prefers_x_axis() {
        // Equal penetration through tile (0,0)'s left and top edges; the
        // stable sort keeps the first-collected (x) candidate.
        let map = loaded(&["WW", "W."], 2, 2);
        let mut sprite = Sprite::new(0.0, 0.0, 4.0, 4.0);
        map.prevent_sprite_overlap(&mut sprite);
        assert_eq!(sprite.position, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_resolve_zeroes_velocity_on_corrected_axis() {
        let map = loaded(&["W"], 1, 1);

        // vertical correction: horizontal motion survives
        let mut sprite = Sprite::new(5.0, -1.0, 4.0, 4.0);
        sprite.physics = Some(Physics {
            velocity: Vec2::new(5.0, -3.0),
            acceleration: Vec2::new(0.0, 9.8),
        });
        map.prevent_sprite_overlap(&mut sprite);
        let physics = sprite.physics.unwrap();
        assert_eq!(physics.velocity, Vec2::new(5.0, 0.0));
        assert_eq!(physics.acceleration, Vec2::ZERO);

        // horizontal correction: vertical motion survives
        let mut sprite = Sprite::new(-1.0, 5.0, 4.0, 4.0);
        sprite.physics = Some(Physics {
            velocity: Vec2::new(5.0, -3.0),
            acceleration: Vec2::ZERO,
        });
        map.prevent_sprite_overlap(&mut sprite);
        let physics = sprite.physics.unwrap();
        assert_eq!(physics.velocity, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_resolve_without_physics_moves_position_only() {
        let map = loaded(&["W"], 1, 1);
        let mut sprite = Sprite::new(-1.0, 5.0, 4.0, 4.0);
        map.prevent_sprite_overlap(&mut sprite);
        assert_eq!(sprite.position, Vec2::new(-2.0, 5.0));
        assert!(sprite.physics.is_none());
    }
}
