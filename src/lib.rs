//! nosnag: tile-grid collision engine (AABB overlap, MTV resolution, no corner snags)

pub mod types;
pub mod api;
pub mod input;
pub mod narrowphase;
pub mod sprite;
pub mod tilemap;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::input::Input;
pub use crate::narrowphase::Narrowphase;
pub use crate::sprite::{Group, Sprite};
pub use crate::tilemap::{Tile, TileMap};
