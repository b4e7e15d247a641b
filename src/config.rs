use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

/// Every tunable of a session. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub player: PlayerConfig,
    pub aliens: AlienConfig,
    pub missiles: MissileConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
    /// Margin kept clear on the left and right edges.
    pub border: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self { width: 640.0, height: 560.0, border: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Units moved per player tick.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { start_x: 282.0, start_y: 500.0, width: 36.0, height: 30.0, speed: 4.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    pub count: usize,
    pub columns: usize,
    pub size: f32,
    pub spacing: f32,
    /// Units moved per alien tick; the drop on a bounce is `speed * aggression`.
    pub speed: f32,
    pub aggression: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub score: u32,
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            count: 32,
            columns: 8,
            size: 40.0,
            spacing: 22.0,
            speed: 8.0,
            aggression: 3.0,
            start_x: 50.0,
            start_y: 60.0,
            score: 25,
        }
    }
}

impl AlienConfig {
    pub fn rows(&self) -> usize {
        self.count.div_ceil(self.columns.max(1))
    }

    /// Distance between the top-left corners of neighbouring slots.
    pub fn pitch(&self) -> f32 {
        self.size + self.spacing
    }

    pub fn formation_width(&self) -> f32 {
        let cols = self.columns.min(self.count) as f32;
        cols * self.size + (cols - 1.0).max(0.0) * self.spacing
    }

    pub fn formation_height(&self) -> f32 {
        let rows = self.rows() as f32;
        rows * self.size + (rows - 1.0).max(0.0) * self.spacing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    pub max_active: usize,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for MissileConfig {
    fn default() -> Self {
        Self { max_active: 3, speed: 6.0, width: 4.0, height: 12.0 }
    }
}

/// Tick periods in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub time_ms: u64,
    pub combo_ms: u64,
    pub alien_ms: u64,
    pub player_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { time_ms: 1000, combo_ms: 1500, alien_ms: 250, player_ms: 20 }
    }
}

impl TimingConfig {
    pub fn time(&self) -> Duration {
        Duration::from_millis(self.time_ms)
    }

    pub fn combo(&self) -> Duration {
        Duration::from_millis(self.combo_ms)
    }

    pub fn alien(&self) -> Duration {
        Duration::from_millis(self.alien_ms)
    }

    pub fn player(&self) -> Duration {
        Duration::from_millis(self.player_ms)
    }
}

impl GameConfig {
    /// Read, parse and validate a TOML file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.floats() {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, format!("must be a finite number, got {value}")));
            }
        }

        let field = &self.playfield;
        if !(field.width > 0.0 && field.height > 0.0) {
            return Err(ConfigError::invalid("playfield", "width and height must be positive"));
        }
        if field.border < 0.0 || field.border * 2.0 >= field.width {
            return Err(ConfigError::invalid("playfield.border", "must leave room between the margins"));
        }

        let t = &self.timing;
        for (name, ms) in [
            ("timing.time_ms", t.time_ms),
            ("timing.combo_ms", t.combo_ms),
            ("timing.alien_ms", t.alien_ms),
            ("timing.player_ms", t.player_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::invalid(name, "must be at least 1 ms"));
            }
        }

        let a = &self.aliens;
        if a.count == 0 {
            return Err(ConfigError::invalid("aliens.count", "must be at least 1"));
        }
        if a.columns == 0 {
            return Err(ConfigError::invalid("aliens.columns", "must be at least 1"));
        }
        if !(a.size > 0.0 && a.speed > 0.0) || a.spacing < 0.0 || a.aggression < 0.0 {
            return Err(ConfigError::invalid("aliens", "size and speed must be positive"));
        }
        let right = a.start_x + a.formation_width();
        if a.start_x <= field.border || right >= field.width - field.border {
            return Err(ConfigError::invalid(
                "aliens.start_x",
                format!("formation spans {}..{right}, outside the margins", a.start_x),
            ));
        }

        let p = &self.player;
        if !(p.speed > 0.0 && p.width > 0.0 && p.height > 0.0) {
            return Err(ConfigError::invalid("player", "speed and size must be positive"));
        }
        if p.start_x <= field.border || p.start_x + p.width >= field.width - field.border {
            return Err(ConfigError::invalid("player.start_x", "must sit between the margins"));
        }
        if p.start_y <= 0.0 || p.start_y >= field.height {
            return Err(ConfigError::invalid("player.start_y", "must be inside the playfield"));
        }
        if a.start_y + a.formation_height() >= p.start_y {
            return Err(ConfigError::invalid("aliens.start_y", "formation already overlaps the player row"));
        }

        let m = &self.missiles;
        if m.max_active == 0 || m.speed <= 0.0 {
            return Err(ConfigError::invalid("missiles", "max_active and speed must be positive"));
        }
        if !(m.width > 0.0 && m.height > 0.0) {
            return Err(ConfigError::invalid("missiles", "width and height must be positive"));
        }
        Ok(())
    }

    fn floats(&self) -> [(&'static str, f32); 17] {
        let (f, p, a, m) = (&self.playfield, &self.player, &self.aliens, &self.missiles);
        [
            ("playfield.width", f.width),
            ("playfield.height", f.height),
            ("playfield.border", f.border),
            ("player.start_x", p.start_x),
            ("player.start_y", p.start_y),
            ("player.width", p.width),
            ("player.height", p.height),
            ("player.speed", p.speed),
            ("aliens.size", a.size),
            ("aliens.spacing", a.spacing),
            ("aliens.speed", a.speed),
            ("aliens.aggression", a.aggression),
            ("aliens.start_x", a.start_x),
            ("aliens.start_y", a.start_y),
            ("missiles.speed", m.speed),
            ("missiles.width", m.width),
            ("missiles.height", m.height),
        ]
    }
}
