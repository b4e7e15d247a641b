use ratatui::prelude::*;
use ratatui::widgets::*;

use alien_sweep::Overlay;

pub fn render(frame: &mut Frame, area: Rect, overlay: &Overlay) {
    let (title, color, lines) = match overlay {
        Overlay::None => return,
        Overlay::Paused => (
            " PAUSED ",
            Color::Rgb(255, 220, 80),
            vec![hint("P", " resume  "), hint("Q", " quit")],
        ),
        Overlay::Victory { score, time } => (
            " VICTORY ",
            Color::Rgb(80, 255, 80),
            vec![
                Span::styled(format!("SCORE {score}   {time}  "), Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
                hint("R", " again"),
            ],
        ),
        Overlay::GameOver { score } => (
            " GAME OVER ",
            Color::Rgb(255, 80, 80),
            vec![
                Span::styled(format!("SCORE {score}  "), Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
                hint("R", " again"),
            ],
        ),
    };

    let overlay_w = 34u16.min(area.width.saturating_sub(2));
    let overlay_h = 5u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    let p = Paragraph::new(vec![Line::from(""), Line::from(lines)])
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(p, overlay_area);
}

fn hint(key: &'static str, what: &'static str) -> Span<'static> {
    Span::styled(format!("{key}{what}"), Style::default().fg(Color::Rgb(140, 140, 160)))
}
