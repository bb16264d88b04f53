//! Tracking provider boundary — что core видит от ARCore-подобного трекера
//!
//! Core не оценивает позу камеры и не матчит картинки: provider раз в frame
//! отдаёт CameraFrame (состояние камеры + обновлённые картинки), core только читает.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние трекинга (камеры или отдельной картинки)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum TrackingState {
    #[default]
    Untracked,
    Tracking,
    Paused,
    Stopped,
}

/// Stable index картинки в image database провайдера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct ImageIndex(pub u32);

impl ImageIndex {
    /// Позиция в Content Registry (картинка N → пункт меню N)
    pub fn content_index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ImageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Физическая поза (world space, метры)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(self.rotation)
    }
}

/// Одна распознанная картинка (snapshot на текущий frame)
///
/// Lifecycle полностью у провайдера — core только наблюдает раз в frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedImage {
    pub index: ImageIndex,
    pub tracking_state: TrackingState,
    pub center_pose: Pose,
    /// Ширина картинки (локальная ось X), метры
    pub extent_x: f32,
    /// Глубина картинки (локальная ось Z), метры
    pub extent_z: f32,
    /// Имя в image database (только для логов)
    pub name: Option<String>,
}

impl TrackedImage {
    pub fn new(index: u32, tracking_state: TrackingState, center_pose: Pose, extent_x: f32, extent_z: f32) -> Self {
        Self {
            index: ImageIndex(index),
            tracking_state,
            center_pose,
            extent_x,
            extent_z,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} '{}'", self.index, name),
            None => self.index.to_string(),
        }
    }
}

/// Данные одного camera frame
///
/// `updated_images` — в порядке перечисления провайдера (этот порядок решает
/// кто победит, если несколько картинок стали TRACKING в одном frame).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraFrame {
    pub camera_state: TrackingState,
    pub updated_images: Vec<TrackedImage>,
}

impl CameraFrame {
    pub fn tracking(updated_images: Vec<TrackedImage>) -> Self {
        Self {
            camera_state: TrackingState::Tracking,
            updated_images,
        }
    }

    pub fn camera_lost() -> Self {
        Self {
            camera_state: TrackingState::Paused,
            updated_images: Vec::new(),
        }
    }
}

/// External tracking oracle (ARCore session, replay file, simulator)
pub trait TrackingProvider: Send + Sync + 'static {
    /// `None` — в этом frame нет camera frame (reconciliation пропускается)
    fn poll_frame(&mut self) -> Option<CameraFrame>;
}

/// Resource: активный tracking provider
///
/// Host вставляет при старте сессии. Нет ресурса → каждый frame пропускается.
#[derive(Resource)]
pub struct TrackingSource {
    provider: Box<dyn TrackingProvider>,
}

impl TrackingSource {
    pub fn new(provider: impl TrackingProvider) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    pub fn poll_frame(&mut self) -> Option<CameraFrame> {
        self.provider.poll_frame()
    }
}
