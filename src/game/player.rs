use crate::config::{PlayerConfig, PlayfieldConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge.
    pub x: f32,
    /// Top edge. Constant for the whole game.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub direction: Direction,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            x: config.start_x,
            y: config.start_y,
            width: config.width,
            height: config.height,
            speed: config.speed,
            direction: Direction::None,
        }
    }

    /// Where missiles leave the ship.
    pub fn muzzle_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// One player tick. A step that would touch the margin is skipped entirely.
    pub fn step(&mut self, field: &PlayfieldConfig) {
        match self.direction {
            Direction::Left => {
                if self.x - self.speed > field.border {
                    self.x -= self.speed;
                }
            }
            Direction::Right => {
                if self.x + self.width + self.speed < field.width - field.border {
                    self.x += self.speed;
                }
            }
            Direction::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, direction: Direction) -> Player {
        Player { x, direction, ..Player::new(&PlayerConfig::default()) }
    }

    #[test]
    fn moves_by_speed() {
        let field = PlayfieldConfig::default();
        let mut p = player_at(100.0, Direction::Left);
        p.step(&field);
        assert_eq!(p.x, 96.0);
        p.direction = Direction::Right;
        p.step(&field);
        p.step(&field);
        assert_eq!(p.x, 104.0);
    }

    #[test]
    fn idle_player_stays_put() {
        let mut p = player_at(100.0, Direction::None);
        p.step(&PlayfieldConfig::default());
        assert_eq!(p.x, 100.0);
    }

    #[test]
    fn left_margin_is_never_crossed() {
        let field = PlayfieldConfig::default();
        // 24 - 4 == border, which counts as crossing
        let mut p = player_at(24.0, Direction::Left);
        p.step(&field);
        assert_eq!(p.x, 24.0);

        let mut p = player_at(24.5, Direction::Left);
        p.step(&field);
        assert_eq!(p.x, 20.5);
        p.step(&field);
        assert_eq!(p.x, 20.5);
    }

    #[test]
    fn right_margin_is_never_crossed() {
        let field = PlayfieldConfig::default();
        let mut p = player_at(500.0, Direction::Right);
        for _ in 0..200 {
            p.step(&field);
            assert!(p.x + p.width < field.width - field.border);
        }
        assert_eq!(p.x, 580.0);
    }

    #[test]
    fn muzzle_is_centered() {
        let p = player_at(282.0, Direction::None);
        assert_eq!(p.muzzle_x(), 300.0);
    }
}
