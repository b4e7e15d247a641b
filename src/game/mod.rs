//! Gameplay rules. Everything in here is pure state over numeric positions;
//! nothing reads a terminal or a wall clock.

pub mod formation;
pub mod input;
pub mod missile;
pub mod player;
pub mod scoring;

use rand::Rng;
use tracing::{debug, info};

use crate::clock::TickKind;
use crate::config::GameConfig;

use formation::{Formation, Step};
use missile::{Impact, MissilePool};
use player::Player;
use scoring::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Running,
    Victory,
    GameOver,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Victory | Status::GameOver)
    }
}

/// Things that happened since the front-end last looked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Paused,
    Resumed,
    MissileFired { id: u32 },
    MissileExpired { id: u32 },
    AlienDestroyed { id: usize, points: u32, combo: u32 },
    Victory,
    GameOver,
}

/// Which full-screen message, if any, should cover the playfield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    Victory { score: u32, time: String },
    GameOver { score: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub missiles_remaining: usize,
    pub score: u32,
    pub kills: usize,
    /// Elapsed play time as `mm:ss`.
    pub time: String,
    pub combo: u32,
}

pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub struct Game {
    config: GameConfig,
    player: Player,
    missiles: MissilePool,
    formation: Formation,
    level: Level,
    status: Status,
    events: Vec<GameEvent>,
}

impl Game {
    /// A fresh level, paused. `rng` only picks alien sprites.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        Self {
            player: Player::new(&config.player),
            missiles: MissilePool::new(&config.missiles),
            formation: Formation::new(&config.aliens, rng),
            level: Level::default(),
            status: Status::Paused,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn missiles(&self) -> &MissilePool {
        &self.missiles
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            missiles_remaining: self.missiles.remaining(),
            score: self.level.score,
            kills: self.level.aliens_destroyed,
            time: format_clock(self.level.elapsed_secs),
            combo: self.level.combo,
        }
    }

    pub fn overlay(&self) -> Overlay {
        match self.status {
            Status::Running => Overlay::None,
            Status::Paused => Overlay::Paused,
            Status::Victory => Overlay::Victory {
                score: self.level.score,
                time: format_clock(self.level.elapsed_secs),
            },
            Status::GameOver => Overlay::GameOver { score: self.level.score },
        }
    }

    /// Apply one scheduler tick. Every tick is ignored unless the game is
    /// running, which is what freezes a paused or finished game.
    pub fn tick(&mut self, kind: TickKind) {
        if self.status != Status::Running {
            return;
        }
        match kind {
            TickKind::Time => self.level.tick_time(),
            TickKind::ComboDecay => self.level.decay_combo(),
            TickKind::Aliens => self.move_aliens(),
            TickKind::Player => {
                self.player.step(&self.config.playfield);
                self.move_missiles();
            }
        }
    }

    pub fn tick_all(&mut self, ticks: impl IntoIterator<Item = TickKind>) {
        for kind in ticks {
            self.tick(kind);
        }
    }

    fn move_aliens(&mut self) {
        if self.formation.step(&self.config.playfield) == Step::Bounced {
            let f = &self.formation;
            debug!(y = f.y, heading = ?f.heading, "formation dropped");
        }
        if self.formation.bounds().bottom() >= self.player.y {
            info!(score = self.level.score, "aliens reached the player");
            self.finish(Status::GameOver);
        }
    }

    fn move_missiles(&mut self) {
        for impact in self.missiles.advance(&mut self.formation) {
            match impact {
                Impact::Hit { missile, alien, score } => {
                    let combo = self.level.combo;
                    let points = self.level.register_kill(score);
                    debug!(missile, alien, points, combo, "alien destroyed");
                    self.events.push(GameEvent::AlienDestroyed { id: alien, points, combo });
                    self.check_victory();
                }
                Impact::Expired { missile } => {
                    self.events.push(GameEvent::MissileExpired { id: missile });
                }
            }
        }
    }

    fn check_victory(&mut self) {
        if self.status == Status::Running && self.level.aliens_destroyed == self.config.aliens.count {
            info!(
                score = self.level.score,
                secs = self.level.elapsed_secs,
                "all aliens destroyed"
            );
            self.finish(Status::Victory);
        }
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        self.events.push(match status {
            Status::Victory => GameEvent::Victory,
            _ => GameEvent::GameOver,
        });
    }
}
