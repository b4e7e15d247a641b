use rand::Rng;

use crate::config::{AlienConfig, PlayfieldConfig};
use crate::game::scoring::Bounds;

/// Number of cosmetic alien sprites.
pub const ALIEN_VARIANTS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    fn flipped(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    /// Slot index, 0..count.
    pub id: usize,
    /// Top-left corner relative to the formation origin.
    pub offset_x: f32,
    pub offset_y: f32,
    pub destroyed: bool,
    pub score: u32,
    /// Sprite picked at spawn, 1..=ALIEN_VARIANTS. Purely cosmetic.
    pub variant: u8,
}

/// What an alien tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Slid,
    /// Dropped a row and reversed.
    Bounced,
}

/// The whole alien grid, moved as one rigid block. Destroyed aliens keep
/// their slot, so the block's extent never changes.
#[derive(Debug, Clone)]
pub struct Formation {
    pub x: f32,
    pub y: f32,
    pub heading: Heading,
    aliens: Vec<Alien>,
    size: f32,
    width: f32,
    height: f32,
    speed: f32,
    aggression: f32,
}

impl Formation {
    pub fn new(config: &AlienConfig, rng: &mut impl Rng) -> Self {
        let pitch = config.pitch();
        let aliens = (0..config.count)
            .map(|id| Alien {
                id,
                offset_x: (id % config.columns) as f32 * pitch,
                offset_y: (id / config.columns) as f32 * pitch,
                destroyed: false,
                score: config.score,
                variant: rng.gen_range(1..=ALIEN_VARIANTS),
            })
            .collect();

        Self {
            x: config.start_x,
            y: config.start_y,
            heading: Heading::Left,
            aliens,
            size: config.size,
            width: config.formation_width(),
            height: config.formation_height(),
            speed: config.speed,
            aggression: config.aggression,
        }
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, w: self.width, h: self.height }
    }

    pub fn alien_bounds(&self, alien: &Alien) -> Bounds {
        Bounds {
            x: self.x + alien.offset_x,
            y: self.y + alien.offset_y,
            w: self.size,
            h: self.size,
        }
    }

    pub fn remaining(&self) -> usize {
        self.aliens.iter().filter(|a| !a.destroyed).count()
    }

    /// First live alien whose box contains the point, in slot order.
    pub fn alien_at(&self, px: f32, py: f32) -> Option<usize> {
        self.aliens
            .iter()
            .find(|a| !a.destroyed && self.alien_bounds(a).contains(px, py))
            .map(|a| a.id)
    }

    /// Mark a slot destroyed and return its score. Unknown or already
    /// destroyed slots yield `None` and change nothing.
    pub fn destroy(&mut self, id: usize) -> Option<u32> {
        let alien = self.aliens.get_mut(id)?;
        if alien.destroyed {
            return None;
        }
        alien.destroyed = true;
        Some(alien.score)
    }

    /// One alien tick: slide sideways, or drop and reverse when the slide
    /// would reach the margin.
    pub fn step(&mut self, field: &PlayfieldConfig) -> Step {
        let fits = match self.heading {
            Heading::Left => self.x - self.speed > field.border,
            Heading::Right => self.x + self.width + self.speed < field.width - field.border,
        };
        if fits {
            match self.heading {
                Heading::Left => self.x -= self.speed,
                Heading::Right => self.x += self.speed,
            }
            Step::Slid
        } else {
            self.y += self.speed * self.aggression;
            self.heading = self.heading.flipped();
            Step::Bounced
        }
    }
}
