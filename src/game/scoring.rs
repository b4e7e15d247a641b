/// Axis-aligned rectangle in playfield units, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    /// Half-open containment: the left and top edges belong to the rectangle,
    /// the right and bottom edges do not.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Running totals for the current level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Score multiplier, never below 1.
    pub combo: u32,
    pub score: u32,
    pub aliens_destroyed: usize,
    pub elapsed_secs: u64,
}

impl Default for Level {
    fn default() -> Self {
        Self { combo: 1, score: 0, aliens_destroyed: 0, elapsed_secs: 0 }
    }
}

impl Level {
    /// Book a kill at the current combo, then raise the combo for the next one.
    /// Returns the points awarded.
    pub fn register_kill(&mut self, base_score: u32) -> u32 {
        let points = base_score.saturating_mul(self.combo);
        self.score = self.score.saturating_add(points);
        self.aliens_destroyed += 1;
        self.combo += 1;
        points
    }

    pub fn decay_combo(&mut self) {
        if self.combo > 1 {
            self.combo -= 1;
        }
    }

    pub fn tick_time(&mut self) {
        self.elapsed_secs += 1;
    }
}
