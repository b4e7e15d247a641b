use tracing::debug;

use crate::game::player::Direction;
use crate::game::{Game, GameEvent, Status};

/// Keys the game understands. Front-ends map their own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Shoot,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: GameKey,
    pub action: KeyAction,
}

impl KeyInput {
    pub fn press(key: GameKey) -> Self {
        Self { key, action: KeyAction::Press }
    }

    pub fn release(key: GameKey) -> Self {
        Self { key, action: KeyAction::Release }
    }
}

impl Game {
    /// A paused game only listens for the pause key going down. Releases are
    /// dropped as well, so a direction held when pausing survives the pause.
    pub fn handle_input(&mut self, input: KeyInput) {
        match self.status {
            Status::Victory | Status::GameOver => return,
            Status::Paused if input != KeyInput::press(GameKey::Pause) => return,
            Status::Paused | Status::Running => {}
        }
        match input.action {
            KeyAction::Press => self.on_press(input.key),
            KeyAction::Release => self.on_release(input.key),
        }
    }

    fn on_press(&mut self, key: GameKey) {
        match key {
            GameKey::Left => self.player.direction = Direction::Left,
            GameKey::Right => self.player.direction = Direction::Right,
            GameKey::Shoot => self.shoot(),
            GameKey::Pause => self.toggle_pause(),
        }
    }

    /// Only the key that set the current direction may clear it, so letting go
    /// of a stale opposite key does not stop the ship.
    fn on_release(&mut self, key: GameKey) {
        let released = match key {
            GameKey::Left => Direction::Left,
            GameKey::Right => Direction::Right,
            GameKey::Shoot | GameKey::Pause => return,
        };
        if self.player.direction == released {
            self.player.direction = Direction::None;
        }
    }

    fn toggle_pause(&mut self) {
        let (status, event) = match self.status {
            Status::Paused => (Status::Running, GameEvent::Resumed),
            Status::Running => (Status::Paused, GameEvent::Paused),
            Status::Victory | Status::GameOver => return,
        };
        debug!(?status, "pause toggled");
        self.status = status;
        self.events.push(event);
    }

    fn shoot(&mut self) {
        let (x, y) = (self.player.muzzle_x(), self.player.y);
        if let Some(id) = self.missiles.shoot(x, y) {
            self.events.push(GameEvent::MissileFired { id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running() -> Game {
        let mut game = Game::new(GameConfig::default(), &mut StdRng::seed_from_u64(3));
        game.handle_input(KeyInput::press(GameKey::Pause));
        assert_eq!(game.status(), Status::Running);
        game
    }

    #[test]
    fn starts_paused_and_ignores_everything_but_pause() {
        let mut game = Game::new(GameConfig::default(), &mut StdRng::seed_from_u64(3));
        assert_eq!(game.status(), Status::Paused);
        game.handle_input(KeyInput::press(GameKey::Left));
        game.handle_input(KeyInput::press(GameKey::Shoot));
        assert_eq!(game.player().direction, Direction::None);
        assert_eq!(game.missiles().active(), 0);
    }

    #[test]
    fn stale_release_keeps_held_direction() {
        let mut game = running();
        game.handle_input(KeyInput::press(GameKey::Left));
        game.handle_input(KeyInput::release(GameKey::Right));
        assert_eq!(game.player().direction, Direction::Left);
        game.handle_input(KeyInput::release(GameKey::Left));
        assert_eq!(game.player().direction, Direction::None);
    }

    #[test]
    fn rolling_from_left_to_right() {
        let mut game = running();
        game.handle_input(KeyInput::press(GameKey::Left));
        game.handle_input(KeyInput::press(GameKey::Right));
        game.handle_input(KeyInput::release(GameKey::Left));
        assert_eq!(game.player().direction, Direction::Right);
    }

    #[test]
    fn release_while_paused_keeps_direction() {
        let mut game = running();
        game.handle_input(KeyInput::press(GameKey::Right));
        game.handle_input(KeyInput::press(GameKey::Pause));
        game.handle_input(KeyInput::release(GameKey::Right));
        game.handle_input(KeyInput::release(GameKey::Pause));
        assert_eq!(game.status(), Status::Paused);
        assert_eq!(game.player().direction, Direction::Right);

        game.handle_input(KeyInput::press(GameKey::Pause));
        assert_eq!(game.player().direction, Direction::Right);
        game.handle_input(KeyInput::release(GameKey::Right));
        assert_eq!(game.player().direction, Direction::None);
    }

    #[test]
    fn shoot_spawns_at_the_muzzle() {
        let mut game = running();
        game.drain_events();
        game.handle_input(KeyInput::press(GameKey::Shoot));
        let missile = &game.missiles().missiles()[0];
        assert_eq!((missile.x, missile.y), (300.0, 500.0));
        assert_eq!(game.drain_events(), vec![GameEvent::MissileFired { id: 0 }]);
    }

    #[test]
    fn pause_toggle_emits_events() {
        let mut game = running();
        game.handle_input(KeyInput::press(GameKey::Pause));
        game.handle_input(KeyInput::press(GameKey::Pause));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Resumed, GameEvent::Paused, GameEvent::Resumed]
        );
        assert_eq!(game.status(), Status::Running);
    }
}
