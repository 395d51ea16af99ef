use glam::Vec2;

use std::error::Error;
use std::fmt;

/// Axis-aligned box given by its top-left corner and extents.
///
/// Width and height are never negative. A rect with zero width or height is
/// a valid degenerate "edge" rect, used to probe collisions from a single
/// direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Boundary of a body stored as center + size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            left: center.x - size.x / 2.0,
            top: center.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    /// Overwrite all four fields in place.
    pub fn set_values(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Velocity and acceleration attached to a sprite.
///
/// Integration is the caller's job. The tile resolver zeroes whichever axis
/// it corrected on, leaving tangential motion alone.
#[derive(Copy, Clone, Debug, Default)]
pub struct Physics {
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// Map construction failures. All of these are configuration mistakes,
/// caught by `TileMap::load` before any tile is placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    /// `tile_symbols` and `texture_indices` must pair up 1:1.
    SymbolIndexMismatch { symbols: usize, indices: usize },
    /// The text map has a different number of rows than the grid.
    RowCountMismatch { expected: usize, found: usize },
    /// A row of the text map has a different number of columns than the grid.
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A mapped texture index points past the end of the tileset.
    TextureIndexOutOfRange {
        symbol: char,
        index: usize,
        tileset_len: usize,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::SymbolIndexMismatch { symbols, indices } => write!(
                f,
                "{symbols} tile symbols but {indices} texture indices; lists must pair up 1:1"
            ),
            MapError::RowCountMismatch { expected, found } => {
                write!(f, "map data has {found} rows, grid expects {expected}")
            }
            MapError::RowLengthMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "map row {row} has {found} columns, grid expects {expected}"
            ),
            MapError::TextureIndexOutOfRange {
                symbol,
                index,
                tileset_len,
            } => write!(
                f,
                "symbol {symbol:?} maps to texture index {index}, but the tileset has {tileset_len} textures"
            ),
        }
    }
}

impl Error for MapError {}
