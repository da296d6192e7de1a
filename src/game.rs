//! The game loop driver.
//!
//! [`Game::step`] runs exactly one fixed tick.  It dispatches on the current
//! [`Phase`]: only `Alive` runs the simulation; the transition phases just
//! count ticks (and, in `GameOver`, watch for the restart key).  Pacing
//! against wall-clock time is the caller's job.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, trace};

use crate::camera::Camera;
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Damage, EntityManager, OverlayMessage, Phase, World};
use crate::input::{InputState, Key};
use crate::level::{place_coins, Level};
use crate::render::{Overlay, RenderFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

pub struct Game {
    config: GameConfig,
    world: World,
    entities: EntityManager,
    phase: Phase,
    camera: Camera,
    tick: u64,
    rng: StdRng,
}

/// Linear 0..=255 ramp over `total` ticks.
fn fade_alpha(elapsed: u32, total: u32) -> u8 {
    if total == 0 || elapsed >= total {
        return u8::MAX;
    }
    (elapsed * 255 / total) as u8
}

impl Game {
    pub fn new(config: GameConfig, level: Level, mut rng: StdRng) -> Self {
        let coins = place_coins(&level, &config, &mut rng);
        let entities = compute::init_entities(&level, &config, &mut rng);
        let camera = Camera::follow(&entities.player.rect, &config);
        Self {
            config,
            world: World { level, coins },
            entities,
            phase: Phase::Alive,
            camera,
            tick: 0,
            rng,
        }
    }

    pub fn with_seed(config: GameConfig, level: Level, seed: u64) -> Self {
        Self::new(config, level, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Ticks run so far, in every phase.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one tick.
    pub fn step(&mut self, input: &InputState) -> StepOutcome {
        if input.quit_requested() {
            info!(tick = self.tick, "quit requested");
            return StepOutcome::Quit;
        }
        self.tick += 1;

        match self.phase {
            Phase::Alive => self.step_alive(input),
            Phase::Dying { message, elapsed } => self.step_dying(message, elapsed + 1),
            Phase::GameOver => self.step_game_over(input),
            Phase::Respawning { elapsed } => self.step_respawning(elapsed + 1),
        }

        self.camera = Camera::follow(&self.entities.player.rect, &self.config);
        StepOutcome::Continue
    }

    fn set_phase(&mut self, phase: Phase) {
        trace!(tick = self.tick, from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    fn step_alive(&mut self, input: &InputState) {
        debug_assert!(
            self.entities.player.lives > 0,
            "alive tick with no lives left"
        );

        compute::update(
            &mut self.entities,
            &self.world,
            input,
            &self.config,
            &mut self.rng,
        );
        if let Some(damage) =
            compute::resolve_collisions(&mut self.entities, &mut self.world, &self.config)
        {
            self.on_damage(damage);
        }
    }

    /// The life has already been deducted; pick the transition.
    fn on_damage(&mut self, damage: Damage) {
        let lives = self.entities.player.lives;
        info!(?damage, lives, "player lost a life");

        let message = if lives == 0 {
            info!(coins = self.entities.player.coin_count, "game over");
            OverlayMessage::GameOver
        } else {
            OverlayMessage::YouDied
        };
        self.set_phase(Phase::Dying {
            message,
            elapsed: 0,
        });
    }

    fn step_dying(&mut self, message: OverlayMessage, elapsed: u32) {
        match message {
            OverlayMessage::GameOver if elapsed >= self.config.fade_ticks => {
                self.set_phase(Phase::GameOver);
            }
            OverlayMessage::YouDied
                if elapsed >= self.config.fade_ticks + self.config.death_hold_ticks =>
            {
                self.respawn();
            }
            _ => self.phase = Phase::Dying { message, elapsed },
        }
    }

    fn step_game_over(&mut self, input: &InputState) {
        if input.was_pressed(Key::Restart) {
            self.restart();
        }
    }

    fn step_respawning(&mut self, elapsed: u32) {
        if elapsed >= self.config.fade_ticks {
            self.set_phase(Phase::Alive);
        } else {
            self.phase = Phase::Respawning { elapsed };
        }
    }

    fn respawn(&mut self) {
        compute::respawn_player(
            &mut self.entities,
            &self.world.level,
            &self.config,
            &mut self.rng,
        );
        self.set_phase(Phase::Respawning { elapsed: 0 });
    }

    /// Continue after a game over: full lives, then the usual respawn.
    /// Collected coins and the coin count carry over.
    fn restart(&mut self) {
        info!(coins = self.entities.player.coin_count, "restarting");
        self.entities.player.lives = self.config.starting_lives;
        self.respawn();
    }

    /// The fade to draw this frame, if any.
    pub fn overlay(&self) -> Option<Overlay> {
        match self.phase {
            Phase::Alive => None,
            Phase::Dying { message, elapsed } => Some(Overlay {
                message: Some(message),
                alpha: fade_alpha(elapsed, self.config.fade_ticks),
                restart_prompt: false,
            }),
            Phase::GameOver => Some(Overlay {
                message: Some(OverlayMessage::GameOver),
                alpha: u8::MAX,
                restart_prompt: true,
            }),
            Phase::Respawning { elapsed } => Some(Overlay {
                message: None,
                alpha: u8::MAX - fade_alpha(elapsed, self.config.fade_ticks),
                restart_prompt: false,
            }),
        }
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.entities, &self.world, self.camera, self.overlay())
    }
}
