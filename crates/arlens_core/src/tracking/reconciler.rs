//! Tracking reconciler — per-frame diff provider state ↔ AnchorRegistry
//!
//! State machine на каждую обновлённую картинку (в порядке провайдера):
//! - PAUSED / UNTRACKED: ничего
//! - TRACKING, нет в registry: выселить всех, создать новый anchor, зарегистрировать
//! - TRACKING, уже в registry: ничего (subtree не перестраивается каждый frame)
//! - STOPPED: удалить из registry + явный despawn subtree

use bevy::prelude::*;

use super::provider::{CameraFrame, ImageIndex, TrackingSource, TrackingState};
use super::registry::{AnchorRegistry, FitToScanHint};
use crate::anchor::spawn_anchor;
use crate::config::ArLensConfig;
use crate::logger;
use crate::renderable::RenderableLoader;

/// Система: reconciliation одного camera frame
///
/// Нет frame / камера не TRACKING → frame пропускается (не ошибка).
pub fn reconcile_tracked_images(
    mut commands: Commands,
    source: Option<ResMut<TrackingSource>>,
    mut registry: ResMut<AnchorRegistry>,
    mut hint: ResMut<FitToScanHint>,
    mut loader: ResMut<RenderableLoader>,
    config: Res<ArLensConfig>,
) {
    let frame = source.and_then(|mut source| source.poll_frame());

    if let Some(frame) = frame.filter(|frame| frame.camera_state == TrackingState::Tracking) {
        apply_frame(&mut commands, &frame, &mut registry, &mut loader, &config);
    }

    let visible = registry.is_empty();
    if hint.visible != visible {
        hint.visible = visible;
    }
}

fn apply_frame(
    commands: &mut Commands,
    frame: &CameraFrame,
    registry: &mut AnchorRegistry,
    loader: &mut RenderableLoader,
    config: &ArLensConfig,
) {
    let mut newly_tracked: Vec<ImageIndex> = Vec::new();

    for image in &frame.updated_images {
        match image.tracking_state {
            TrackingState::Paused | TrackingState::Untracked => {}

            TrackingState::Tracking => {
                if registry.contains(image.index) {
                    continue;
                }

                // Single-active-image policy: новая картинка выселяет все старые
                let entity = spawn_anchor(commands, image, loader, &config.assets);
                for (evicted_index, evicted) in registry.replace_with(image.index, entity) {
                    commands.entity(evicted).despawn();
                    logger::log(&format!("🗑️ Anchor {} evicted by {}", evicted_index, image.index));
                }

                newly_tracked.push(image.index);
                logger::log_info(&format!("🎯 Tracking {} → anchor {:?}", image.label(), entity));
            }

            TrackingState::Stopped => {
                if let Some(entity) = registry.remove(image.index) {
                    commands.entity(entity).despawn();
                    logger::log_info(&format!("🛑 Image {} stopped, anchor removed", image.label()));
                }
            }
        }
    }

    if newly_tracked.len() > 1 {
        logger::log_warning(&format!(
            "⚠️ {} images became tracked in one frame ({:?}); last in provider order wins",
            newly_tracked.len(),
            newly_tracked
        ));
    }
}
