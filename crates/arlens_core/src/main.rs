//! Headless ArLens demo
//!
//! Гоняет App без камеры и рендера: scripted tracking → anchor lifecycle → выбор языка.
//! С `ARLENS_TRANSLATE_API_KEY` переводы идут в реальный сервис, иначе только смена языка.
//! `arlens_core random [seed]` — стресс-прогон на RandomTracker.

use arlens_core::{
    create_headless_app, log_error, log_info, AnchorRegistry, ArLensConfig, ArLensPlugin, CameraFrame, ContentRegistry,
    DetailPanel, FitToScanHint, GoogleTranslateClient, LanguageSelected, MemoryAssetBackend, Pose, RandomTracker,
    RenderableLoader, ScriptedTracker, TrackedImage, TrackingSource, TrackingState, TranslationBackend,
};
use bevy::prelude::*;
use std::time::Duration;

const RANDOM_TICKS: usize = 1000;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config();

    let mut app = create_headless_app();
    let backend = MemoryAssetBackend::from_keys(&config.assets.all_keys());
    app.insert_resource(RenderableLoader::new(backend));

    match GoogleTranslateClient::from_config(&config) {
        Ok(client) => {
            app.insert_resource(TranslationBackend::new(client));
        }
        Err(err) => log_info(&format!("Translation disabled: {}", err)),
    }

    app.insert_resource(config);
    app.add_plugins(ArLensPlugin);

    match args.first().map(String::as_str) {
        Some("random") => {
            let seed = args.get(1).and_then(|raw| raw.parse().ok()).unwrap_or(42);
            run_random(&mut app, seed);
        }
        _ => run_scripted(&mut app),
    }
}

fn load_config() -> ArLensConfig {
    let config = match std::env::var("ARLENS_CONFIG") {
        Ok(path) => ArLensConfig::load(&path).unwrap_or_else(|err| {
            log_error(&format!("Falling back to default config: {}", err));
            ArLensConfig::default()
        }),
        Err(_) => ArLensConfig::default(),
    };
    config.with_env_overrides()
}

fn run_scripted(app: &mut App) {
    let tracker = ScriptedTracker::new();
    app.insert_resource(TrackingSource::new(tracker.clone()));

    let menu = TrackedImage::new(0, TrackingState::Tracking, Pose::from_translation(Vec3::new(0.0, 0.0, -0.5)), 0.2, 0.2)
        .with_name("menu_card");

    // Камера ещё не готова
    tracker.push_missing_frame();
    tracker.push_frame(CameraFrame::camera_lost());
    tracker.push_frame(CameraFrame::tracking(vec![menu.clone()]));

    for _ in 0..3 {
        app.update();
    }
    wait_until(app, |world| world.query::<&DetailPanel>().iter(world).count() == 1);
    report(app, "menu tracked");

    app.world_mut().send_event(LanguageSelected::new("da"));
    app.update();
    wait_until(app, |world| world.resource::<arlens_core::translation::TranslationTasks>().in_flight() == 0);
    app.update();
    report(app, "language selected");

    let mut stopped = menu;
    stopped.tracking_state = TrackingState::Stopped;
    tracker.push_frame(CameraFrame::tracking(vec![stopped]));
    app.update();
    report(app, "menu stopped");
}

fn run_random(app: &mut App, seed: u64) {
    app.insert_resource(TrackingSource::new(RandomTracker::new(seed, 4)));

    for tick in 0..RANDOM_TICKS {
        app.update();

        let registered = app.world().resource::<AnchorRegistry>().len();
        assert!(registered <= 1, "single-active-image policy violated at tick {}", tick);

        if tick % 100 == 0 {
            report(app, &format!("tick {}", tick));
        }
    }

    println!("Random run complete (seed: {})", seed);
}

/// Даёт фоновым задачам (загрузки, перевод) завершиться
fn wait_until(app: &mut App, mut done: impl FnMut(&mut World) -> bool) {
    for _ in 0..500 {
        if done(app.world_mut()) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
        app.update();
    }
    log_error("Timed out waiting for background work");
}

fn report(app: &mut App, stage: &str) {
    let world = app.world_mut();
    let registered = world.resource::<AnchorRegistry>().len();
    let hint_visible = world.resource::<FitToScanHint>().visible;
    let language = world.resource::<ContentRegistry>().target_language().to_string();
    let headers: Vec<String> = world
        .query::<&DetailPanel>()
        .iter(world)
        .map(|panel| panel.header.clone())
        .collect();

    println!(
        "[{}] anchors: {}, fit-to-scan: {}, language: {}, detail: {:?}",
        stage, registered, hint_visible, language, headers
    );
}
