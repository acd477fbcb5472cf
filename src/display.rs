/// Rendering layer — all terminal I/O lives here.
///
/// Each frame the arena (in arena units) is scaled onto the terminal grid
/// between the HUD row and the controls hint.  Entities arrive as vector
/// line art from `bubble_shooter::render` and are rasterized into a cell
/// canvas before anything is printed.  No game logic is performed here.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use bubble_shooter::entities::Phase;
use bubble_shooter::render::{
    aircraft_outline, bubble_rim, bullet_outline, FrameView, Point, Segment,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Cyan;
const C_HUD_TIME_LOW: Color = Color::Red;
const C_TITLE: Color = Color::White;
const C_AIRCRAFT: Color = Color::White;
const C_BUBBLE: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Seconds left at which the timer turns red.
const TIME_WARNING: u32 = 10;

// ── Arena → terminal mapping ──────────────────────────────────────────────────

/// Maps arena coordinates onto the play area inside the border.
/// Play area: columns 1 .. width-1, rows 2 .. height-2.
struct Viewport {
    scale_x: f32,
    scale_y: f32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(view: &FrameView<'_>, width: u16, height: u16) -> Self {
        let cols = width.saturating_sub(2).max(1);
        let rows = height.saturating_sub(4).max(1);
        Self {
            scale_x: cols as f32 / view.arena_width,
            scale_y: rows as f32 / view.arena_height,
            cols,
            rows,
        }
    }

    /// Fractional cell coordinates inside the play area.
    fn project(&self, p: Point) -> (f32, f32) {
        (p.x * self.scale_x, p.y * self.scale_y)
    }

    /// Screen cell for an arena point, or `None` when outside the play area.
    fn cell(&self, p: Point) -> Option<(u16, u16)> {
        let (cx, cy) = self.project(p);
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let (col, row) = (cx as u16, cy as u16);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some((col + 1, row + 2))
    }
}

// ── Cell canvas ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct Canvas {
    cells: HashMap<(u16, u16), (char, Color)>,
}

impl Canvas {
    fn plot(&mut self, vp: &Viewport, p: Point, glyph: char, color: Color) {
        if let Some(cell) = vp.cell(p) {
            self.cells.insert(cell, (glyph, color));
        }
    }

    /// Walk a segment at sub-cell steps, picking a glyph from its slope.
    fn stroke(&mut self, vp: &Viewport, s: Segment, color: Color) {
        let (x0, y0) = vp.project(s.from);
        let (x1, y1) = vp.project(s.to);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let glyph = stroke_glyph(dx, dy);

        let steps = (dx.abs().max(dy.abs()) * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = Point::new(
                s.from.x + (s.to.x - s.from.x) * t,
                s.from.y + (s.to.y - s.from.y) * t,
            );
            self.plot(vp, p, glyph, color);
        }
    }

    fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (&(col, row), &(glyph, color)) in &self.cells {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
        Ok(())
    }
}

fn stroke_glyph(dx: f32, dy: f32) -> char {
    if dx.abs() < dy.abs() * 0.5 {
        '│'
    } else if dy.abs() < dx.abs() * 0.5 {
        '─'
    } else if (dx > 0.0) == (dy > 0.0) {
        // y grows downward, so same sign means "\"
        '\\'
    } else {
        '/'
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &FrameView<'_>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, view, width)?;

    let vp = Viewport::new(view, width, height);
    let mut canvas = Canvas::default();
    draw_bubbles(&mut canvas, &vp, view);
    draw_bullets(&mut canvas, &vp, view);
    draw_aircraft(&mut canvas, &vp, view);
    canvas.flush(out)?;

    draw_controls_hint(out, height)?;

    if view.phase == Phase::Over {
        draw_game_over(out, view, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &FrameView<'_>, width: u16) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>4}", view.score)))?;

    // Title — centre
    let title = "Aircraft Bubble Shooter";
    let tx = (width / 2).saturating_sub(title.len() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    // Time — right
    let time_text = format!("Time: {:>2}s", view.time_left);
    let rx = width.saturating_sub(time_text.chars().count() as u16 + 1);
    let time_color = if view.time_left <= TIME_WARNING {
        C_HUD_TIME_LOW
    } else {
        C_HUD_TIME
    };
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(time_color))?;
    out.queue(Print(&time_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_aircraft(canvas: &mut Canvas, vp: &Viewport, view: &FrameView<'_>) {
    for segment in aircraft_outline(view.aircraft()) {
        canvas.stroke(vp, segment, C_AIRCRAFT);
    }
}

fn draw_bubbles(canvas: &mut Canvas, vp: &Viewport, view: &FrameView<'_>) {
    for bubble in view.bubbles() {
        let radius_cells = bubble.radius * vp.scale_x;
        if radius_cells < 1.0 {
            // Too small for a rim; a single dot.
            canvas.plot(vp, Point::new(bubble.x, bubble.y), '●', C_BUBBLE);
            continue;
        }
        let samples = (radius_cells * 8.0).ceil() as usize;
        for p in bubble_rim(bubble, samples) {
            canvas.plot(vp, p, 'o', C_BUBBLE);
        }
    }
}

fn draw_bullets(canvas: &mut Canvas, vp: &Viewport, view: &FrameView<'_>) {
    let (w, h) = (view.bullet_width, view.bullet_height);
    for bullet in view.bullets() {
        if w * vp.scale_x < 1.5 {
            // Sub-cell bullet: mark the tip only.
            canvas.plot(vp, Point::new(bullet.x + w / 2.0, bullet.y - h), '^', C_BULLET);
            continue;
        }
        for segment in bullet_outline(bullet, w, h) {
            canvas.stroke(vp, segment, C_BULLET);
        }
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &FrameView<'_>,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", view.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Restart  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
