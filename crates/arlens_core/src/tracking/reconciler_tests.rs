//! Tests for the per-frame tracking reconciler.

#[cfg(test)]
mod tests {
    use crate::anchor::AugmentedImageAnchor;
    use crate::renderable::{AssetManifest, MemoryAssetBackend, RenderableLoader};
    use crate::tracking::{
        AnchorRegistry, CameraFrame, FitToScanHint, ImageIndex, Pose, ScriptedTracker, TrackedImage, TrackingSource,
        TrackingState,
    };
    use crate::{create_headless_app, ArLensPlugin};
    use bevy::prelude::*;

    fn create_tracking_app() -> (App, ScriptedTracker) {
        let mut app = create_headless_app();
        let backend = MemoryAssetBackend::from_keys(&AssetManifest::default().all_keys());
        app.insert_resource(RenderableLoader::new(backend));
        app.add_plugins(ArLensPlugin);

        let tracker = ScriptedTracker::new();
        app.insert_resource(TrackingSource::new(tracker.clone()));
        (app, tracker)
    }

    fn image(index: u32, state: TrackingState) -> TrackedImage {
        TrackedImage::new(index, state, Pose::from_translation(Vec3::new(index as f32, 0.0, -1.0)), 0.2, 0.2)
    }

    fn anchor_entities(app: &mut App) -> Vec<(Entity, ImageIndex)> {
        let world = app.world_mut();
        let mut query = world.query::<(Entity, &AugmentedImageAnchor)>();
        query.iter(world).map(|(entity, anchor)| (entity, anchor.image_index)).collect()
    }

    fn registry(app: &App) -> &AnchorRegistry {
        app.world().resource::<AnchorRegistry>()
    }

    #[test]
    fn test_missing_frame_is_skipped() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_missing_frame();
        assert_eq!(tracker.pending(), 1);
        app.update();

        assert_eq!(tracker.pending(), 0);
        assert!(registry(&app).is_empty());
        assert!(app.world().resource::<FitToScanHint>().visible);
    }

    #[test]
    fn test_camera_not_tracking_is_skipped() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame {
            camera_state: TrackingState::Paused,
            updated_images: vec![image(0, TrackingState::Tracking)],
        });
        app.update();

        assert!(registry(&app).is_empty());
        assert!(anchor_entities(&mut app).is_empty());
    }

    #[test]
    fn test_newly_tracked_image_gets_anchor() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
        app.update();

        assert_eq!(registry(&app).len(), 1);
        assert!(registry(&app).contains(ImageIndex(0)));
        assert!(!app.world().resource::<FitToScanHint>().visible);

        let anchors = anchor_entities(&mut app);
        assert_eq!(anchors.len(), 1);
        assert_eq!(Some(anchors[0].0), registry(&app).get(ImageIndex(0)));
    }

    #[test]
    fn test_already_tracked_image_is_not_rebuilt() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
        app.update();
        let first = registry(&app).get(ImageIndex(0));

        for _ in 0..5 {
            tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
            app.update();
        }

        assert_eq!(registry(&app).get(ImageIndex(0)), first);
        assert_eq!(anchor_entities(&mut app).len(), 1);
    }

    #[test]
    fn test_paused_image_is_ignored() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
        app.update();
        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Paused)]));
        tracker.push_frame(CameraFrame::tracking(vec![image(1, TrackingState::Paused)]));
        app.update();
        app.update();

        assert!(registry(&app).contains(ImageIndex(0)));
        assert_eq!(registry(&app).len(), 1);
    }

    #[test]
    fn test_stopped_image_is_removed_and_despawned() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
        app.update();
        let anchor = registry(&app).get(ImageIndex(0)).unwrap();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Stopped)]));
        app.update();

        assert!(registry(&app).is_empty());
        assert!(app.world().get_entity(anchor).is_err());
        assert!(app.world().resource::<FitToScanHint>().visible);
    }

    #[test]
    fn test_new_image_evicts_previous_anchor() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
        app.update();
        let evicted = registry(&app).get(ImageIndex(0)).unwrap();

        // Image 0 всё ещё TRACKING, но новая картинка выселяет её
        tracker.push_frame(CameraFrame::tracking(vec![
            image(0, TrackingState::Tracking),
            image(1, TrackingState::Tracking),
        ]));
        app.update();

        assert_eq!(registry(&app).len(), 1);
        assert!(registry(&app).contains(ImageIndex(1)));
        assert!(app.world().get_entity(evicted).is_err());
    }

    #[test]
    fn test_simultaneous_new_images_last_in_provider_order_wins() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![
            image(2, TrackingState::Tracking),
            image(1, TrackingState::Tracking),
        ]));
        app.update();

        assert_eq!(registry(&app).active().map(|(index, _)| index), Some(ImageIndex(1)));
        let anchors = anchor_entities(&mut app);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].1, ImageIndex(1));
    }

    #[test]
    fn test_stopping_unknown_image_is_noop() {
        let (mut app, tracker) = create_tracking_app();

        tracker.push_frame(CameraFrame::tracking(vec![image(0, TrackingState::Tracking)]));
        tracker.push_frame(CameraFrame::tracking(vec![image(3, TrackingState::Stopped)]));
        app.update();
        app.update();

        assert!(registry(&app).contains(ImageIndex(0)));
    }
}
