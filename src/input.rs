use std::collections::HashSet;
use std::mem;

use log::warn;

/// Keyboard state tracker.
///
/// The host's windowing layer reports raw key events through `queue_press`
/// and `queue_release` as they arrive; `update` folds the queues into
/// per-frame state once per loop iteration, so queries stay stable for the
/// whole frame. Keys are named by string, matching whatever names the host
/// layer produces.
#[derive(Debug, Default)]
pub struct Input {
    // one-frame state, rebuilt by every update
    pressed: HashSet<String>,
    released: HashSet<String>,
    // held keys, persists across frames
    pressing: HashSet<String>,
    // raw events waiting for the next update
    press_queue: Vec<String>,
    release_queue: Vec<String>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw key-down event for the next `update`.
    pub fn queue_press(&mut self, key: impl Into<String>) {
        self.press_queue.push(key.into());
    }

    /// Record a raw key-up event for the next `update`.
    pub fn queue_release(&mut self, key: impl Into<String>) {
        self.release_queue.push(key.into());
    }

    /// Fold queued events into frame state. Call once per frame, before any
    /// queries.
    pub fn update(&mut self) {
        self.pressed.clear();
        self.released.clear();

        for key in mem::take(&mut self.press_queue) {
            // auto-repeat delivers duplicate down events while a key is held
            if self.pressing.contains(&key) {
                continue;
            }
            self.pressed.insert(key.clone());
            self.pressing.insert(key);
        }

        for key in mem::take(&mut self.release_queue) {
            if !self.pressing.remove(&key) {
                warn!("released key {key:?} was never pressed");
            }
            self.released.insert(key);
        }
    }

    /// True only on the frame the key went down.
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// True for every frame the key is held.
    pub fn is_pressing(&self, key: &str) -> bool {
        self.pressing.contains(key)
    }

    /// True only on the frame the key came back up.
    pub fn is_released(&self, key: &str) -> bool {
        self.released.contains(key)
    }
}
