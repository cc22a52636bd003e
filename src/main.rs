//! Duck Hunt entry point
//!
//! Runs a headless session driven by the autopilot on simulated time and
//! logs how it went. Usage: `duck-hunt [SEED]`.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use duck_hunt::assets::AssetCatalog;
use duck_hunt::audio::{AudioManager, LogBackend};
use duck_hunt::consts::FRAME_MS;
use duck_hunt::demo::Autopilot;
use duck_hunt::render::HeadlessRenderer;
use duck_hunt::sim::Session;
use duck_hunt::{App, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Duck Hunt starting...");

    let settings = Settings::load();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| match arg.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring seed argument {:?}: {}", arg, e);
                None
            }
        })
        .or(settings.seed)
        .unwrap_or_else(time_seed);
    log::info!("Game initialized with seed: {}", seed);

    let catalog = AssetCatalog::new(Path::new(&settings.asset_root));
    let missing = catalog.verify();
    if !missing.is_empty() {
        for err in missing.iter().take(5) {
            log::warn!("{}", err);
        }
        log::warn!(
            "{} of {} assets missing under {}; continuing without them",
            missing.len(),
            catalog.all_paths().len(),
            catalog.root().display()
        );
    }

    let mut audio = AudioManager::new(Box::new(LogBackend::default()), catalog);
    audio.set_volume(settings.volume);
    audio.set_muted(settings.muted);

    let mut app = App::new(Session::new(seed), audio, HeadlessRenderer::default());
    let mut pilot = Autopilot::new(settings.demo.clone(), seed.wrapping_add(1));

    while !app.should_exit() && app.session.now() < settings.demo.max_duration_ms {
        if let Some(input) = pilot.poll(&app.session) {
            app.input(input);
        }
        app.update(FRAME_MS);
    }

    if !app.should_exit() {
        log::warn!(
            "Stopped after {} ms of simulated time",
            settings.demo.max_duration_ms
        );
    }

    let stats = &app.stats;
    log::info!(
        "Run finished at {:.1}s: {} shots, {} ducks, {} levels cleared, {} game over, {} completed",
        app.session.now() as f64 / 1000.0,
        stats.shots,
        stats.ducks_shot,
        stats.levels_cleared,
        stats.games_over,
        stats.games_completed
    );
}

/// Seed from the wall clock when none is given
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
