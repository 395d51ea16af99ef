use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::narrowphase::Narrowphase;
use crate::types::{Physics, Rect};

/// A movable game object: a centered axis-aligned box plus optional
/// attached components (physics, visibility).
///
/// `angle` is in degrees and feeds the movement helpers and whatever the
/// host renders; collision geometry stays axis-aligned regardless.
#[derive(Clone, Debug)]
pub struct Sprite {
    /// Center of the sprite in world space.
    pub position: Vec2,
    /// Width and height of the collision boundary.
    pub size: Vec2,
    /// Display rotation in degrees.
    pub angle: f32,
    pub visible: bool,
    pub physics: Option<Physics>,
}

impl Sprite {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            angle: 0.0,
            visible: true,
            physics: None,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn move_by(&mut self, delta_x: f32, delta_y: f32) {
        self.position += Vec2::new(delta_x, delta_y);
    }

    pub fn rotate_by(&mut self, delta_degrees: f32) {
        self.angle += delta_degrees;
    }

    /// Move `distance` along `angle_degrees` (0 = +x, 90 = +y).
    pub fn move_at_angle(&mut self, distance: f32, angle_degrees: f32) {
        self.position += Vec2::from_angle(angle_degrees.to_radians()) * distance;
    }

    /// Move `distance` along the sprite's current angle.
    pub fn move_forward(&mut self, distance: f32) {
        self.move_at_angle(distance, self.angle);
    }

    /// Collision boundary derived from the current position and size.
    /// Recomputed on every call; the result is an independent value.
    pub fn boundary(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    pub fn is_overlapping(&self, other: &Sprite) -> bool {
        Narrowphase::overlap_rect_rect(&self.boundary(), &other.boundary())
    }

    /// Move this sprite by the pair MTV so it no longer overlaps `other`.
    ///
    /// Resolves one pair at a time; when three or more sprites overlap at
    /// once, the outcome depends on the order of calls.
    pub fn prevent_overlap(&mut self, other: &Sprite) {
        if self.is_overlapping(other) {
            let mtv = Narrowphase::mtv_rect_rect(&self.boundary(), &other.boundary());
            self.position += mtv;
        }
    }
}

/// A named, ordered collection of sprites, iterated each frame for updates
/// and collision candidates.
#[derive(Clone, Debug, Default)]
pub struct Group {
    name: String,
    sprites: Vec<Sprite>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sprites: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    /// Keep only the sprites the predicate accepts, preserving order.
    pub fn retain(&mut self, f: impl FnMut(&Sprite) -> bool) {
        self.sprites.retain(f);
    }
}
