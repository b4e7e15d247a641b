mod overlay;

use ratatui::prelude::*;
use ratatui::widgets::*;

use alien_sweep::game::formation::Formation;
use alien_sweep::Hud;

use crate::app::App;

const BG: Color = Color::Rgb(0, 0, 5);

/// One glyph per alien sprite variant (1-based).
const ALIEN_SPRITES: [(&str, Color); 5] = [
    ("/o\\", Color::Rgb(255, 80, 80)),
    ("{@}", Color::Rgb(80, 255, 150)),
    ("<M>", Color::Rgb(200, 180, 255)),
    ("}W{", Color::Rgb(255, 200, 80)),
    ("(=)", Color::Rgb(80, 200, 255)),
];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" 👾 Alien Sweep ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(8),    // Playfield
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(hud_line(&app.game.hud(), app.game.config().missiles.max_active)), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        frame.render_widget(Paragraph::new(render_field(app, fw, fh)), chunks[1]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);

    overlay::render(frame, chunks[1], &app.game.overlay());
}

fn hud_line(hud: &Hud, max_missiles: usize) -> Line<'static> {
    let loaded = "I".repeat(hud.missiles_remaining);
    let spent = "\u{00b7}".repeat(max_missiles.saturating_sub(hud.missiles_remaining));
    let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));
    Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(loaded, Style::default().fg(Color::Rgb(255, 255, 200)).add_modifier(Modifier::BOLD)),
        Span::styled(spent, Style::default().fg(Color::DarkGray)),
        sep(),
        Span::styled(
            format!("SCORE {}", hud.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(format!("KILLS {}", hud.kills), Style::default().fg(Color::Rgb(255, 80, 80))),
        sep(),
        Span::styled(hud.time.clone(), Style::default().fg(Color::Cyan)),
        sep(),
        Span::styled(
            format!("X{}", hud.combo),
            Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Character grid for the playfield, scaled from game units to cells.
struct Grid {
    cells: Vec<Vec<(char, Style)>>,
    sx: f32,
    sy: f32,
}

impl Grid {
    fn new(w: usize, h: usize, field_w: f32, field_h: f32) -> Self {
        Self {
            cells: vec![vec![(' ', Style::default().bg(BG)); w]; h],
            sx: w as f32 / field_w,
            sy: h as f32 / field_h,
        }
    }

    /// Write `text` centred on the game-space point `(x, y)`, clipping at the edges.
    fn put(&mut self, x: f32, y: f32, text: &str, style: Style) {
        let row = (y * self.sy) as i32;
        let len = text.chars().count() as i32;
        let start = (x * self.sx) as i32 - len / 2;
        if row < 0 || row as usize >= self.cells.len() {
            return;
        }
        let line = &mut self.cells[row as usize];
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if col >= 0 && (col as usize) < line.len() {
                line[col as usize] = (ch, style);
            }
        }
    }

    /// Paint every cell covered by the game-space box, at least one cell.
    fn fill(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, ch: char, style: Style) {
        let (rows, cols) = (self.cells.len() as i32, self.cells.first().map_or(0, Vec::len) as i32);
        let r0 = (y0 * self.sy) as i32;
        let c0 = (x0 * self.sx) as i32;
        let r1 = ((y1 * self.sy).ceil() as i32).max(r0 + 1);
        let c1 = ((x1 * self.sx).ceil() as i32).max(c0 + 1);
        for row in r0.max(0)..r1.min(rows) {
            for col in c0.max(0)..c1.min(cols) {
                self.cells[row as usize][col as usize] = (ch, style);
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn render_field(app: &App, w: usize, h: usize) -> Vec<Line<'static>> {
    let game = &app.game;
    let field = &game.config().playfield;
    let mut grid = Grid::new(w, h, field.width, field.height);

    // Margins
    let margin_style = Style::default().fg(Color::Rgb(30, 60, 30)).bg(BG);
    let sy = grid.sy;
    for y in (0..h).map(|r| (r as f32 + 0.5) / sy) {
        grid.put(field.border, y, "\u{2502}", margin_style);
        grid.put(field.width - field.border, y, "\u{2502}", margin_style);
    }

    draw_aliens(&mut grid, game.formation(), app);

    let missile_style = Style::default().fg(Color::Rgb(255, 255, 200)).bg(BG).add_modifier(Modifier::BOLD);
    let pool = game.missiles();
    for m in pool.missiles() {
        let b = pool.bounds(m);
        grid.fill(b.x, b.y, b.x + b.w, b.bottom(), '\u{2551}', missile_style);
    }

    let p = game.player();
    let ship_style = Style::default().fg(Color::Rgb(80, 255, 80)).bg(BG).add_modifier(Modifier::BOLD);
    grid.put(p.muzzle_x(), p.y, "\u{25b2}", ship_style);
    grid.put(p.muzzle_x(), p.y + p.height / 2.0, "/\u{2588}\\", ship_style);

    grid.into_lines()
}

fn draw_aliens(grid: &mut Grid, formation: &Formation, app: &App) {
    let explosion = Style::default().fg(Color::Rgb(255, 160, 60)).bg(BG).add_modifier(Modifier::BOLD);
    for alien in formation.aliens() {
        let b = formation.alien_bounds(alien);
        let (cx, cy) = (b.x + b.w / 2.0, b.y + b.h / 2.0);
        if alien.destroyed {
            if app.flashes.iter().any(|f| f.alien == alien.id) {
                grid.put(cx, cy, "\\*/", explosion);
            }
            continue;
        }
        let (sprite, color) = ALIEN_SPRITES[(alien.variant as usize).saturating_sub(1) % ALIEN_SPRITES.len()];
        grid.put(cx, cy, sprite, Style::default().fg(color).bg(BG));
    }
}
