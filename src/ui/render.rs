use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::{DisplayConfig, KeyBindings};
use crate::game::{state::Paddle, GameState, Player};

// Layout: score line, hint/HUD line, then the bordered field
const UI_HEADER_ROWS: u16 = 2;

/// Colors for everything drawn on the field
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub player: Color,
    pub ai: Color,
    pub border: Color,
    pub score: Color,
}

impl Palette {
    pub fn from_config(display: &DisplayConfig) -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
        Self {
            player: rgb(display.player_color),
            ai: rgb(display.ai_color),
            border: rgb(display.border_color),
            score: rgb(display.score_color),
        }
    }

    /// The ball takes the color of whoever touched it last
    pub fn ball(&self, last_hit: Option<Player>) -> Color {
        match last_hit {
            Some(Player::Ai) => self.ai,
            Some(Player::Human) | None => self.player,
        }
    }
}

/// Maps virtual field coordinates onto canvas pixels inside the border
struct FieldScale {
    scale_x: f32,
    scale_y: f32,
}

impl FieldScale {
    fn new(canvas: &BrailleCanvas, state: &GameState) -> Self {
        Self {
            scale_x: canvas.pixel_width().saturating_sub(2) as f32 / state.field_width,
            scale_y: canvas.pixel_height().saturating_sub(2) as f32 / state.field_height,
        }
    }

    fn x(&self, vx: f32) -> usize {
        1 + (vx.max(0.0) * self.scale_x) as usize
    }

    fn y(&self, vy: f32) -> usize {
        1 + (vy.max(0.0) * self.scale_y) as usize
    }

    fn width(&self, vw: f32) -> usize {
        ((vw * self.scale_x) as usize).max(1)
    }

    fn height(&self, vh: f32) -> usize {
        ((vh * self.scale_y) as usize).max(1)
    }
}

/// Controls line shown under the score when the HUD is off
pub fn controls_hint(bindings: &KeyBindings) -> String {
    let key = |binding: &str| match binding.trim() {
        b if b.eq_ignore_ascii_case("left") => "←".to_string(),
        b if b.eq_ignore_ascii_case("right") => "→".to_string(),
        b if b.eq_ignore_ascii_case("up") => "↑".to_string(),
        b if b.eq_ignore_ascii_case("down") => "↓".to_string(),
        b => b.to_string(),
    };

    format!(
        "{}/{}: Move  {}: Pause  {}: Fuzzy HUD  {}: Quit",
        key(&bindings.paddle_left),
        key(&bindings.paddle_right),
        key(&bindings.pause),
        key(&bindings.toggle_hud),
        key(&bindings.quit),
    )
}

pub fn render(
    frame: &mut Frame,
    state: &GameState,
    palette: &Palette,
    hint: &str,
    hud: Option<&str>,
    overlay: Option<&OverlayMessage>,
) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    draw_scores(frame, state, palette, area);
    draw_hint(frame, hud.unwrap_or(hint), hud.is_some(), area);

    if area.height > UI_HEADER_ROWS {
        let field_area = Rect {
            x: area.x,
            y: area.y + UI_HEADER_ROWS,
            width: area.width,
            height: area.height - UI_HEADER_ROWS,
        };
        let canvas = draw_field(state, palette, field_area);
        render_braille_canvas(frame, &canvas, field_area);
    }

    if let Some(message) = overlay {
        render_overlay(frame, message, area);
    }
}

fn draw_field(state: &GameState, palette: &Palette, field_area: Rect) -> BrailleCanvas {
    let mut canvas = BrailleCanvas::new(field_area.width as usize, field_area.height as usize);
    let (pixel_width, pixel_height) = (canvas.pixel_width(), canvas.pixel_height());
    canvas.stroke_rect(0, 0, pixel_width, pixel_height, palette.border);

    let scale = FieldScale::new(&canvas, state);

    draw_paddle(&mut canvas, &scale, &state.ai_paddle, palette.ai);
    draw_paddle(&mut canvas, &scale, &state.player_paddle, palette.player);

    let ball = &state.ball;
    canvas.fill_rect(
        scale.x(ball.x - ball.radius),
        scale.y(ball.y - ball.radius),
        scale.width(ball.radius * 2.0),
        scale.height(ball.radius * 2.0),
        palette.ball(state.last_hit),
    );

    canvas
}

fn draw_paddle(canvas: &mut BrailleCanvas, scale: &FieldScale, paddle: &Paddle, color: Color) {
    canvas.fill_rect(
        scale.x(paddle.x),
        scale.y(paddle.y),
        scale.width(paddle.width),
        scale.height(paddle.height),
        color,
    );
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    // One line per cell row, consecutive cells of the same color share a span
    for y in 0..canvas.height() {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_color = canvas.color(0, y);

        for x in 0..canvas.width() {
            let color = canvas.color(x, y);
            if color != run_color && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    Style::default().fg(run_color),
                ));
            }
            run_color = color;
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, Style::default().fg(run_color)));
        }

        let row_area = Rect {
            x: area.x,
            y: area.y + y as u16,
            width: area.width,
            height: 1,
        };

        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn draw_scores(frame: &mut Frame, state: &GameState, palette: &Palette, area: Rect) {
    let line = Line::from(vec![
        Span::styled("FUZZY ", Style::default().fg(palette.ai)),
        Span::styled(
            format!("{}  :  {}", state.ai_score, state.player_score),
            Style::default()
                .fg(palette.score)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" YOU", Style::default().fg(palette.player)),
    ]);

    let score_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.min(1),
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), score_area);
}

fn draw_hint(frame: &mut Frame, text: &str, is_hud: bool, area: Rect) {
    if area.height < 2 {
        return;
    }

    let color = if is_hud { Color::Gray } else { Color::DarkGray };

    let hint = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);

    let hint_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: 1,
    };

    frame.render_widget(hint, hint_area);
}
