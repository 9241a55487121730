/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `FrameView`.
/// No game logic is performed; this module only translates world units into
/// terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use laser_defender::entities::{GameStatus, Laser, Rect, Target};
use laser_defender::game::FrameView;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_MUSIC: Color = Color::Magenta;
const C_PADDLE: Color = Color::Blue;
const C_TARGET: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn laser_color(style: u8) -> Color {
    match style {
        2 => Color::Cyan,
        3 => Color::Magenta,
        4 => Color::Yellow,
        5 => Color::White,
        _ => Color::Green,
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates onto the bordered play area: columns
/// `1..cols-1`, rows `2..rows-2`.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: i32,
    world_h: i32,
}

impl Viewport {
    fn inner_cols(&self) -> i32 {
        i32::from(self.cols.saturating_sub(2)).max(1)
    }

    fn inner_rows(&self) -> i32 {
        i32::from(self.rows.saturating_sub(4)).max(1)
    }

    fn col(&self, x: i32) -> i32 {
        1 + x * self.inner_cols() / self.world_w.max(1)
    }

    fn row(&self, y: i32) -> i32 {
        2 + y * self.inner_rows() / self.world_h.max(1)
    }

    fn col_visible(&self, col: i32) -> bool {
        col >= 1 && col < i32::from(self.cols) - 1
    }

    fn row_visible(&self, row: i32) -> bool {
        row >= 2 && row < i32::from(self.rows) - 2
    }

    /// Terminal span covered by a world rectangle, at least one cell wide.
    fn span(&self, rect: &Rect) -> (i32, i32) {
        let start = self.col(rect.left());
        let end = self.col(rect.right()).max(start + 1);
        (start, end)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &FrameView<'_>) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport {
        cols,
        rows,
        world_w: view.width,
        world_h: view.height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &vp)?;
    draw_hud(out, view, &vp)?;

    for target in view.targets {
        draw_target(out, target, &vp)?;
    }
    for laser in view.lasers {
        draw_laser(out, laser, view.laser_style, &vp)?;
    }

    draw_paddle(out, &view.paddle, &vp)?;
    draw_controls_hint(out, &vp)?;

    if view.status == GameStatus::GameOver {
        draw_game_over(out, view, &vp)?;
    }
    if view.show_high_scores {
        draw_high_scores(out, view, &vp)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &FrameView<'_>, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}",
        view.score, view.high_score
    )))?;

    // Laser style, centred
    let style_str = format!("[ LASER {} ]", view.laser_style);
    let sx = (vp.cols / 2).saturating_sub(style_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(laser_color(view.laser_style)))?;
    out.queue(Print(&style_str))?;

    let music_str = if view.music_enabled { "♪ ON " } else { "♪ OFF" };
    let mx = vp.cols.saturating_sub(music_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_MUSIC))?;
    out.queue(Print(music_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_paddle<W: Write>(out: &mut W, paddle: &Rect, vp: &Viewport) -> std::io::Result<()> {
    let row = vp.row(paddle.top());
    if !vp.row_visible(row) {
        return Ok(());
    }
    let (start, end) = vp.span(paddle);
    let start = start.max(1);
    let end = end.min(i32::from(vp.cols) - 1);
    if end <= start {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_PADDLE))?;
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(Print("▀".repeat((end - start) as usize)))?;
    Ok(())
}

fn draw_laser<W: Write>(
    out: &mut W,
    laser: &Laser,
    laser_style: u8,
    vp: &Viewport,
) -> std::io::Result<()> {
    let col = vp.col(laser.rect.center_x());
    if !vp.col_visible(col) {
        return Ok(());
    }
    let top = vp.row(laser.rect.top());
    let bottom = vp.row(laser.rect.bottom()).max(top + 1);

    out.queue(style::SetForegroundColor(laser_color(laser_style)))?;
    for row in (top..bottom).filter(|r| vp.row_visible(*r)) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

/// A target is drawn as a bar of `●` as wide as its diameter, on the row of
/// its centre.
fn draw_target<W: Write>(out: &mut W, target: &Target, vp: &Viewport) -> std::io::Result<()> {
    let row = vp.row(target.y);
    if !vp.row_visible(row) {
        return Ok(());
    }
    let (start, end) = vp.span(&target.bounds());
    let cells: Vec<i32> = (start..end).filter(|c| vp.col_visible(*c)).collect();
    let Some(&first) = cells.first() else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_TARGET))?;
    out.queue(cursor::MoveTo(first as u16, row as u16))?;
    out.queue(Print("●".repeat(cells.len())))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move  SPACE : Shoot  1-5 : Laser  M : Music  H : Scores  Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Print `lines` centred as a block in the middle of the screen.
fn draw_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, view: &FrameView<'_>, vp: &Viewport) -> std::io::Result<()> {
    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", view.score), Color::Yellow),
    ];

    match view.last_game {
        Some(summary) if summary.new_record => {
            lines.push((
                format!("★ NEW RECORD  +{} ★", summary.margin()),
                Color::Yellow,
            ));
        }
        Some(summary) if summary.ranked => {
            lines.push(("Entered the high-score table".to_string(), Color::Green));
        }
        _ => {
            lines.push((format!("Best Score:  {:>6}", view.high_score), Color::DarkGrey));
        }
    }
    lines.push(("R - Play Again  Q - Quit".to_string(), Color::White));

    draw_centered(out, vp, &lines)
}

fn draw_high_scores<W: Write>(
    out: &mut W,
    view: &FrameView<'_>,
    vp: &Viewport,
) -> std::io::Result<()> {
    let mut lines: Vec<(String, Color)> = vec![
        ("══════  HIGH  SCORES  ══════".to_string(), Color::Cyan),
        (String::new(), Color::Reset),
    ];

    if view.high_scores.is_empty() {
        lines.push(("No scores yet".to_string(), Color::DarkGrey));
    }
    for (rank, record) in view.high_scores.iter().enumerate() {
        lines.push((
            format!(
                "{:>2}. {:>6}  {:<12.12} {:<16}  L{}",
                rank + 1,
                record.score,
                record.player,
                record.timestamp,
                record.laser_style
            ),
            if rank == 0 { Color::Yellow } else { Color::White },
        ));
    }

    let stats = view.stats;
    lines.push((String::new(), Color::Reset));
    lines.push((
        format!(
            "Games: {}  Best: {}  Avg: {}  Total: {}",
            stats.count, stats.best, stats.average, stats.total
        ),
        Color::DarkGrey,
    ));
    lines.push(("C - Clear  H - Close".to_string(), Color::DarkGrey));

    draw_centered(out, vp, &lines)
}
