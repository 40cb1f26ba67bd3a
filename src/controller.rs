//! Session controller: phase machine and fixed-step scheduler
//!
//! The controller owns the simulation. Each display frame hands it the
//! current wall-clock time; it drains whole 1/60 s slices from an
//! accumulator, feeds the score collaborator, and exposes a read-only
//! snapshot for drawing. Invalid phase transitions are silently ignored.

use glam::IVec2;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_SNAP_TOLERANCE, MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{InputState, Key};
use crate::score::ScoreTracker;
use crate::settings::Settings;
use crate::sim::{EntityState, GamePhase, GameState, Sprite, Terrain, tick};

/// End-of-run result handed to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub elapsed_secs: f64,
    pub kills: u32,
    pub deaths: u32,
}

/// What one call to [`Controller::frame`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Slices drained this frame
    pub slices: u32,
    /// Set on the frame the run is won: the caller should save it
    pub finished: Option<RunSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Bullet,
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: IVec2,
    pub size: IVec2,
    pub sprite: Sprite,
    pub state: EntityState,
}

/// HUD counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub health: i32,
    pub ammo: i32,
    pub elapsed_secs: f64,
    pub kills: u32,
    pub deaths: u32,
    pub score: u64,
}

/// Read-only view of the world between slices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Player first, then enemies, then bullets
    pub entities: Vec<EntityView>,
    pub camera_offset: i32,
    /// Viewport the camera clamp was computed for
    pub view_size: IVec2,
    pub hud: HudSnapshot,
}

pub struct Controller {
    phase: GamePhase,
    /// Pristine terrain every run starts from
    blueprint: Terrain,
    state: GameState,
    score: ScoreTracker,
    input: InputState,
    /// Unsimulated time in seconds
    accumulator: f64,
    last_frame_time: Option<f64>,
    /// Run clock start, shifted forward by time spent paused
    run_started_at: f64,
    paused_at: Option<f64>,
    finished_at: Option<f64>,
    view_size: IVec2,
}

impl Controller {
    pub fn new(terrain: Terrain, settings: &Settings) -> Self {
        Self {
            phase: GamePhase::Menu,
            state: GameState::new(terrain.clone(), settings.view_width),
            blueprint: terrain,
            score: ScoreTracker::new(),
            input: InputState::new(),
            accumulator: 0.0,
            last_frame_time: None,
            run_started_at: 0.0,
            paused_at: None,
            finished_at: None,
            view_size: IVec2::new(settings.view_width, settings.view_height),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn press(&mut self, key: Key) {
        self.input.press(key);
    }

    pub fn release(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Leave the menu
    pub fn start(&mut self, now_secs: f64) {
        if self.phase == GamePhase::Menu {
            self.start_new_game(now_secs);
        }
    }

    /// Full new run from any phase: fresh world, score and clock
    pub fn start_new_game(&mut self, now_secs: f64) {
        self.state = GameState::new(self.blueprint.clone(), self.view_size.x);
        self.score.reset();
        self.input.clear_all();
        self.accumulator = 0.0;
        self.last_frame_time = Some(now_secs);
        self.run_started_at = now_secs;
        self.paused_at = None;
        self.finished_at = None;
        self.phase = GamePhase::Running;
        info!(
            "Run started: {} enemies, map {}px wide",
            self.state.enemies.len(),
            self.state.terrain.width()
        );
    }

    pub fn pause(&mut self, now_secs: f64) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Paused;
        self.paused_at = Some(now_secs);
        self.input.clear_all();
        debug!("Paused at {:.2}s", self.run_elapsed_secs(now_secs));
    }

    pub fn resume(&mut self, now_secs: f64) {
        if self.phase != GamePhase::Paused {
            return;
        }
        if let Some(paused_at) = self.paused_at.take() {
            self.run_started_at += now_secs - paused_at;
        }
        self.last_frame_time = Some(now_secs);
        self.phase = GamePhase::Running;
        debug!("Resumed at {:.2}s", self.run_elapsed_secs(now_secs));
    }

    /// Run clock, excluding time spent paused
    pub fn run_elapsed_secs(&self, now_secs: f64) -> f64 {
        let end = self.finished_at.or(self.paused_at).unwrap_or(now_secs);
        match self.phase {
            GamePhase::Menu => 0.0,
            _ => (end - self.run_started_at).max(0.0),
        }
    }

    /// Advance by the wall-clock time since the previous frame
    pub fn frame(&mut self, now_secs: f64) -> FrameReport {
        let dt = self
            .last_frame_time
            .map_or(0.0, |last| (now_secs - last).max(0.0));
        self.last_frame_time = Some(now_secs);

        if self.phase != GamePhase::Running {
            self.handle_control(now_secs);
            return FrameReport::default();
        }

        if dt > MAX_FRAME_DT {
            warn!("Frame took {:.0}ms, clamping", dt * 1000.0);
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut report = FrameReport::default();
        while self.accumulator >= SIM_DT - FRAME_SNAP_TOLERANCE && report.slices < MAX_SUBSTEPS {
            let slice = self.input.drain_slice();
            if slice.restart {
                self.start_new_game(now_secs);
                return report;
            }
            if slice.pause {
                self.pause(now_secs);
                return report;
            }

            let kills = self.state.kills;
            let deaths = self.state.deaths;
            tick(&mut self.state, &slice.tick);
            self.accumulator -= SIM_DT;
            report.slices += 1;

            for _ in kills..self.state.kills {
                self.score.on_kill();
            }
            for _ in deaths..self.state.deaths {
                self.score.on_death();
            }
            self.score.update(SIM_DT);

            if self.state.won {
                report.finished = Some(self.finish(now_secs));
                break;
            }
        }

        if report.slices == MAX_SUBSTEPS {
            debug!("Slice cap reached, {:.1}ms carried", self.accumulator * 1000.0);
        }
        report
    }

    /// Pause/restart requests while gameplay is frozen
    fn handle_control(&mut self, now_secs: f64) {
        let control = self.input.drain_control();
        if control.restart {
            self.start_new_game(now_secs);
        } else if control.pause && self.phase == GamePhase::Paused {
            self.resume(now_secs);
        }
    }

    fn finish(&mut self, now_secs: f64) -> RunSummary {
        self.phase = GamePhase::GameOver;
        self.finished_at = Some(now_secs);
        let summary = RunSummary {
            score: self.score.score(),
            // Slice time, so a clamped frame cannot inflate it
            elapsed_secs: self.score.elapsed_secs(),
            kills: self.state.kills,
            deaths: self.state.deaths,
        };
        info!(
            "Game over: score {} in {:.1}s ({} kills, {} deaths)",
            summary.score, summary.elapsed_secs, summary.kills, summary.deaths
        );
        summary
    }

    /// Read-only view for the display collaborator
    pub fn snapshot(&self, now_secs: f64) -> Snapshot {
        let state = &self.state;
        let player = &state.player;

        let mut entities = Vec::with_capacity(1 + state.enemies.len() + state.bullets.len());
        entities.push(EntityView {
            kind: EntityKind::Player,
            pos: player.body.pos,
            size: player.body.size,
            sprite: player.sprite(),
            state: player.body.state,
        });
        entities.extend(state.enemies.iter().map(|enemy| EntityView {
            kind: EntityKind::Enemy,
            pos: enemy.body.pos,
            size: enemy.body.size,
            sprite: enemy.sprite(),
            state: enemy.body.state,
        }));
        entities.extend(state.bullets.iter().map(|bullet| EntityView {
            kind: EntityKind::Bullet,
            pos: bullet.body.pos,
            size: bullet.body.size,
            sprite: bullet.sprite(),
            state: bullet.body.state,
        }));

        Snapshot {
            phase: self.phase,
            entities,
            camera_offset: state.camera_offset,
            view_size: self.view_size,
            hud: HudSnapshot {
                health: player.body.health,
                ammo: player.body.ammo,
                elapsed_secs: self.run_elapsed_secs(now_secs),
                kills: state.kills,
                deaths: state.deaths,
                score: self.score.score(),
            },
        }
    }
}
