//! Tracking domain — provider boundary, anchor registry, per-frame reconciliation
//!
//! Архитектура:
//! - Provider (ARCore / replay / simulator) = oracle, только читаем раз в frame
//! - AnchorRegistry = единственный владелец anchor entities
//! - reconcile_tracked_images = единственное место, где anchors создаются/удаляются

use bevy::prelude::*;

pub mod provider;
pub mod reconciler;
pub mod registry;
pub mod simulated;

#[cfg(test)]
mod reconciler_tests;

pub use provider::{CameraFrame, ImageIndex, Pose, TrackedImage, TrackingProvider, TrackingSource, TrackingState};
pub use reconciler::reconcile_tracked_images;
pub use registry::{AnchorRegistry, FitToScanHint};
pub use simulated::{RandomTracker, ScriptedTracker};

use crate::ArLensSet;

/// Tracking Plugin
///
/// TrackingSource вставляет host; без него каждый frame пропускается.
pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnchorRegistry>()
            .init_resource::<FitToScanHint>()
            .add_systems(Update, reconcile_tracked_images.in_set(ArLensSet::Reconcile));
    }
}
