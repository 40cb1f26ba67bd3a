//! Cyborg Platform entry point
//!
//! Headless runner: loads settings and the level, then drives the
//! controller with simulated frame times and a scripted input track.
//! A finished run is recorded on the leaderboard.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use cyborg_platform::sim::{GamePhase, Terrain};
    use cyborg_platform::{ConfigError, Controller, Key, Leaderboard, RunSummary, Settings};

    /// Display cadence of the simulated frame clock
    const FRAME_SECS: f64 = 1.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    const JUMP_EVERY: u32 = 40;
    const SHOOT_EVERY: u32 = 25;

    pub fn run() -> Result<(), ConfigError> {
        let settings_path = std::env::args()
            .nth(1)
            .map_or_else(|| PathBuf::from("settings.json"), PathBuf::from);
        let settings = Settings::load(&settings_path)?;
        let terrain = Terrain::load(&settings.level_path)?;

        let mut controller = Controller::new(terrain, &settings);
        controller.start(0.0);
        controller.press(Key::Right);

        let mut now = 0.0;
        for frame in 0..MAX_FRAMES {
            now += FRAME_SECS;
            script(&mut controller, frame);

            let report = controller.frame(now);
            if let Some(summary) = report.finished {
                record(&settings, &summary);
                break;
            }
        }

        let hud = controller.snapshot(now).hud;
        log::info!(
            "Session ended in {:?}: x={}, health {}, ammo {}, {} kills, {} deaths, score {}",
            controller.phase(),
            controller.state().player.body.pos.x,
            hud.health,
            hud.ammo,
            hud.kills,
            hud.deaths,
            hud.score
        );
        if controller.phase() != GamePhase::GameOver {
            log::info!("Run not finished after {} frames", MAX_FRAMES);
        }
        Ok(())
    }

    /// Hold right, tap jump and shoot on a fixed rhythm
    fn script(controller: &mut Controller, frame: u32) {
        match frame % JUMP_EVERY {
            0 => controller.press(Key::Jump),
            12 => controller.release(Key::Jump),
            _ => {}
        }
        match frame % SHOOT_EVERY {
            0 => controller.press(Key::Shoot),
            1 => controller.release(Key::Shoot),
            _ => {}
        }
    }

    fn record(settings: &Settings, summary: &RunSummary) {
        let path = &settings.leaderboard_path;
        let mut board = match Leaderboard::open(path) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("Leaderboard not updated: {e}");
                return;
            }
        };

        let rank = board.add_entry(&settings.player_name, summary.score);
        log::info!("Score {} recorded at rank {rank}", summary.score);
        if let Err(e) = board.save(path) {
            log::warn!("Leaderboard not saved: {e}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cyborg Platform (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on wasm32
}
