//! Simulated tracking providers (headless demo + тесты)
//!
//! - ScriptedTracker: заранее записанная последовательность frames
//! - RandomTracker: детерминированный random walk по состояниям картинок (seeded ChaCha8)

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::provider::{CameraFrame, Pose, TrackedImage, TrackingProvider, TrackingState};

/// Очередь frames; пустая очередь = "нет camera frame"
///
/// Clone шарит очередь — тест держит clone и подкладывает frames между `app.update()`.
#[derive(Clone, Default)]
pub struct ScriptedTracker {
    frames: Arc<Mutex<VecDeque<Option<CameraFrame>>>>,
}

impl ScriptedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&self, frame: CameraFrame) {
        self.lock().push_back(Some(frame));
    }

    /// Frame без camera data (host ещё не получил кадр)
    pub fn push_missing_frame(&self) {
        self.lock().push_back(None);
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Option<CameraFrame>>> {
        self.frames.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TrackingProvider for ScriptedTracker {
    fn poll_frame(&mut self) -> Option<CameraFrame> {
        self.lock().pop_front().flatten()
    }
}

/// Random walk: каждый frame случайное подмножество картинок меняет состояние
pub struct RandomTracker {
    rng: ChaCha8Rng,
    image_count: u32,
    states: Vec<TrackingState>,
    /// Вероятность что камера в этом frame не трекается
    camera_loss_chance: f64,
}

impl RandomTracker {
    pub fn new(seed: u64, image_count: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            image_count,
            states: vec![TrackingState::Untracked; image_count as usize],
            camera_loss_chance: 0.1,
        }
    }

    /// Panics если `chance` вне [0, 1]
    pub fn with_camera_loss_chance(mut self, chance: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&chance),
            "camera loss chance must be within [0, 1], got {}",
            chance
        );
        self.camera_loss_chance = chance;
        self
    }

    /// Последнее выданное состояние картинки
    pub fn current_state(&self, index: u32) -> TrackingState {
        self.states
            .get(index as usize)
            .copied()
            .unwrap_or(TrackingState::Untracked)
    }

    pub fn next_frame(&mut self) -> CameraFrame {
        if self.rng.gen_bool(self.camera_loss_chance) {
            return CameraFrame::camera_lost();
        }

        let mut updated = Vec::new();
        for index in 0..self.image_count {
            // ~30% картинок обновляются в каждом frame
            if !self.rng.gen_bool(0.3) {
                continue;
            }

            let state = match self.rng.gen_range(0..4) {
                0 => TrackingState::Paused,
                1 => TrackingState::Stopped,
                _ => TrackingState::Tracking,
            };
            self.states[index as usize] = state;

            let center = Vec3::new(
                self.rng.gen_range(-0.5..0.5),
                self.rng.gen_range(-0.2..0.2),
                self.rng.gen_range(-1.5..-0.3),
            );
            let extent = self.rng.gen_range(0.1..0.3);
            updated.push(TrackedImage::new(index, state, Pose::from_translation(center), extent, extent));
        }

        CameraFrame::tracking(updated)
    }
}

impl TrackingProvider for RandomTracker {
    fn poll_frame(&mut self) -> Option<CameraFrame> {
        Some(self.next_frame())
    }
}
