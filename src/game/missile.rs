use crate::config::MissileConfig;
use crate::game::formation::Formation;
use crate::game::scoring::Bounds;

#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    pub id: u32,
    /// Reference point used for hit tests: horizontal centre, top edge.
    pub x: f32,
    pub y: f32,
}

/// How a missile left the pool during `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Hit { missile: u32, alien: usize, score: u32 },
    /// Left through the top of the playfield.
    Expired { missile: u32 },
}

#[derive(Debug, Clone)]
pub struct MissilePool {
    missiles: Vec<Missile>,
    max_active: usize,
    speed: f32,
    width: f32,
    height: f32,
    next_id: u32,
}

impl MissilePool {
    pub fn new(config: &MissileConfig) -> Self {
        Self {
            missiles: Vec::with_capacity(config.max_active),
            max_active: config.max_active,
            speed: config.speed,
            width: config.width,
            height: config.height,
            next_id: 0,
        }
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn active(&self) -> usize {
        self.missiles.len()
    }

    /// Drawn extent of a missile, hanging below its reference point. Hit
    /// tests use the point alone.
    pub fn bounds(&self, missile: &Missile) -> Bounds {
        Bounds {
            x: missile.x - self.width / 2.0,
            y: missile.y,
            w: self.width,
            h: self.height,
        }
    }

    /// Shots still available before the cap is hit.
    pub fn remaining(&self) -> usize {
        self.max_active.saturating_sub(self.missiles.len())
    }

    /// Launch a missile from `(x, y)`. Returns its id, or `None` at the cap.
    pub fn shoot(&mut self, x: f32, y: f32) -> Option<u32> {
        if self.missiles.len() >= self.max_active {
            return None;
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.missiles.push(Missile { id, x, y });
        Some(id)
    }

    /// Move every missile up one step, then resolve hits against live aliens
    /// and exits through the top. Missiles are processed in launch order, so
    /// an alien destroyed by an earlier missile is already gone for later ones.
    pub fn advance(&mut self, formation: &mut Formation) -> Vec<Impact> {
        let speed = self.speed;
        let mut impacts = Vec::new();
        self.missiles.retain_mut(|m| {
            m.y -= speed;
            if let Some(alien) = formation.alien_at(m.x, m.y) {
                if let Some(score) = formation.destroy(alien) {
                    impacts.push(Impact::Hit { missile: m.id, alien, score });
                    return false;
                }
            }
            if m.y < 0.0 {
                impacts.push(Impact::Expired { missile: m.id });
                return false;
            }
            true
        });
        impacts
    }
}
