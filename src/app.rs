use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use alien_sweep::game::input::{GameKey, KeyInput};
use alien_sweep::{Clock, Game, GameConfig, GameEvent, Status};

/// How long a destroyed alien shows its explosion.
pub const EXPLOSION_FLASH: Duration = Duration::from_millis(500);

/// Without release reporting a held key shows up as a stream of repeated
/// presses. A direction key silent for this long counts as released. Longer
/// than the usual X11 autorepeat delay of 660 ms.
const SYNTHETIC_RELEASE_AFTER: Duration = Duration::from_millis(700);

pub struct Flash {
    pub alien: usize,
    pub remaining: Duration,
}

pub struct App {
    pub should_quit: bool,
    pub game: Game,
    pub flashes: Vec<Flash>,
    config: GameConfig,
    clock: Clock,
    rng: StdRng,
    last_update: Instant,
    /// Set when the terminal cannot report key releases.
    synthesize_releases: bool,
    held: Option<(GameKey, Duration)>,
}

impl App {
    pub fn new(config: GameConfig, seed: u64, synthesize_releases: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            should_quit: false,
            game: Game::new(config.clone(), &mut rng),
            flashes: Vec::new(),
            clock: Clock::new(&config.timing),
            config,
            rng,
            last_update: Instant::now(),
            synthesize_releases,
            held: None,
        }
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(elapsed);
    }

    /// Run the simulation forward by `elapsed` of wall time.
    pub fn advance(&mut self, elapsed: Duration) {
        self.age_held_key(elapsed);

        let ticks = self.clock.advance(elapsed);
        self.game.tick_all(ticks);
        if self.game.status().is_terminal() && !self.clock.is_halted() {
            self.clock.halt();
        }

        for flash in &mut self.flashes {
            flash.remaining = flash.remaining.saturating_sub(elapsed);
        }
        self.flashes.retain(|f| !f.remaining.is_zero());

        for event in self.game.drain_events() {
            match event {
                GameEvent::AlienDestroyed { id, .. } => {
                    self.flashes.push(Flash { alien: id, remaining: EXPLOSION_FLASH });
                }
                GameEvent::Victory | GameEvent::GameOver => {
                    info!(?event, hud = ?self.game.hud(), "game finished");
                }
                _ => debug!(?event),
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Bring the simulation up to date so input lands at the right time.
        self.on_tick();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc if pressed => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') if pressed => self.restart(),
            code => {
                let Some(game_key) = game_key(code) else { return };
                if pressed {
                    self.game.handle_input(KeyInput::press(game_key));
                    if matches!(game_key, GameKey::Left | GameKey::Right) {
                        self.held = Some((game_key, Duration::ZERO));
                    }
                } else {
                    self.game.handle_input(KeyInput::release(game_key));
                }
            }
        }
    }

    /// The game drops releases while paused, so the silence clock only runs
    /// while the game does.
    fn age_held_key(&mut self, elapsed: Duration) {
        if !self.synthesize_releases || self.game.status() != Status::Running {
            return;
        }
        let Some((key, quiet)) = self.held.as_mut() else { return };
        *quiet += elapsed;
        if *quiet >= SYNTHETIC_RELEASE_AFTER {
            let key = *key;
            self.held = None;
            self.game.handle_input(KeyInput::release(key));
        }
    }

    /// Start over with the same configuration. Sprites are re-rolled.
    fn restart(&mut self) {
        info!("restarting");
        self.game = Game::new(self.config.clone(), &mut self.rng);
        self.clock = Clock::new(&self.config.timing);
        self.flashes.clear();
        self.held = None;
    }
}

fn game_key(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Left => Some(GameKey::Left),
        KeyCode::Right => Some(GameKey::Right),
        KeyCode::Char(' ') => Some(GameKey::Shoot),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameKey::Pause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alien_sweep::game::player::Direction;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE, kind, state: KeyEventState::NONE }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(key(code, KeyEventKind::Press));
    }

    #[test]
    fn keys_map_onto_game_keys() {
        assert_eq!(game_key(KeyCode::Left), Some(GameKey::Left));
        assert_eq!(game_key(KeyCode::Char(' ')), Some(GameKey::Shoot));
        assert_eq!(game_key(KeyCode::Char('P')), Some(GameKey::Pause));
        assert_eq!(game_key(KeyCode::Up), None);
    }

    #[test]
    fn release_events_clear_direction() {
        let mut app = App::new(GameConfig::default(), 1, false);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.game.player().direction, Direction::Right);
        app.on_key(key(KeyCode::Right, KeyEventKind::Release));
        assert_eq!(app.game.player().direction, Direction::None);
    }

    #[test]
    fn silent_direction_key_is_released_without_release_reporting() {
        let mut app = App::new(GameConfig::default(), 1, true);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Left);
        app.advance(Duration::from_millis(400));
        assert_eq!(app.game.player().direction, Direction::Left);
        app.advance(Duration::from_millis(400));
        assert_eq!(app.game.player().direction, Direction::None);
    }

    #[test]
    fn held_key_outlives_the_first_autorepeat_delay() {
        let mut app = App::new(GameConfig::default(), 1, true);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Left);
        app.advance(Duration::from_millis(660));
        assert_eq!(app.game.player().direction, Direction::Left);
        app.on_key(key(KeyCode::Left, KeyEventKind::Repeat));
        app.advance(Duration::from_millis(660));
        assert_eq!(app.game.player().direction, Direction::Left);
    }

    #[test]
    fn pause_holds_the_synthetic_release() {
        let mut app = App::new(GameConfig::default(), 1, true);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('p'));
        app.advance(Duration::from_secs(5));
        assert_eq!(app.game.status(), Status::Paused);
        assert_eq!(app.game.player().direction, Direction::Left);

        press(&mut app, KeyCode::Char('p'));
        app.advance(Duration::from_millis(400));
        assert_eq!(app.game.player().direction, Direction::Left);
        app.advance(Duration::from_millis(400));
        assert_eq!(app.game.player().direction, Direction::None);
    }

    #[test]
    fn kill_starts_a_flash_that_fades() {
        let mut config = GameConfig::default();
        config.aliens.count = 1;
        config.player.start_x = 52.0;
        let mut app = App::new(config, 1, false);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..100 {
            app.advance(Duration::from_millis(20));
            if !app.flashes.is_empty() {
                break;
            }
        }
        assert_eq!(app.game.status(), Status::Victory);
        assert_eq!(app.flashes.len(), 1);
        app.advance(EXPLOSION_FLASH);
        assert!(app.flashes.is_empty());
    }

    #[test]
    fn restart_resets_the_level() {
        let mut app = App::new(GameConfig::default(), 1, false);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.status(), Status::Paused);
        assert_eq!(app.game.missiles().active(), 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(GameConfig::default(), 1, false);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
