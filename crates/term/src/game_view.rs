//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Phase, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{FruitType, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BACKDROP: Rgb = Rgb::new(30, 30, 40);
const BACKDROP_ALT: Rgb = Rgb::new(26, 40, 32);
const WARNING: Rgb = Rgb::new(255, 90, 90);

/// Display color of a fruit
pub fn fruit_color(fruit: FruitType) -> Rgb {
    match fruit {
        FruitType::Cherry => Rgb::new(220, 40, 60),
        FruitType::Peach => Rgb::new(255, 170, 150),
        FruitType::Orange => Rgb::new(255, 150, 30),
        FruitType::Banana => Rgb::new(245, 225, 80),
        FruitType::Melon => Rgb::new(110, 210, 90),
        FruitType::Blueberry => Rgb::new(80, 110, 230),
        FruitType::Grape => Rgb::new(160, 80, 200),
    }
}

/// A lightweight terminal renderer for the fruit board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    backdrop: Rgb,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let w = board_px_w + 2;
        let h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            backdrop: if snap.alternate_backdrop() {
                BACKDROP_ALT
            } else {
                BACKDROP
            },
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), frame.backdrop),
        );
        self.draw_border(fb, &frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match snap.board[y as usize][x as usize] {
                    Some(fruit) => self.draw_fruit_cell(fb, &frame, x as i8, y as i8, fruit),
                    None => self.draw_empty_cell(fb, &frame, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y, fruit) in active.cells {
                self.draw_fruit_cell(fb, &frame, x, y, fruit);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &frame);
        self.draw_overlay(fb, snap, &frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: &Frame, style: CellStyle) {
        let Frame { x, y, w, h, .. } = *frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: &Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), frame.backdrop).dim();
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    /// Fruit letter on the fruit's color; cells above the board are skipped
    fn draw_fruit_cell(&self, fb: &mut FrameBuffer, frame: &Frame, x: i8, y: i8, fruit: FruitType) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let style = CellStyle::new(Rgb::new(20, 20, 20), fruit_color(fruit)).bold();
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, fruit.letter(), style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: &Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = frame.y;
        let mut field = |fb: &mut FrameBuffer, name: &str| {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            let row = y;
            y = y.saturating_add(2);
            row
        };

        let row = field(fb, "SCORE");
        fb.put_u32(panel_x, row, snap.score, value);

        let row = field(fb, "HIGH SCORE");
        fb.put_u32(panel_x, row, snap.high_score, value);

        match snap.goal {
            Some(goal) => {
                let row = field(fb, "GOAL");
                fb.put_u32(panel_x, row, goal, value);
                let row = field(fb, "STAGE");
                fb.put_u32(panel_x, row, snap.stage, value);
            }
            None => {
                let row = field(fb, "MODE");
                fb.put_str(panel_x, row, "SCORE ATTACK", value);
            }
        }

        let row = field(fb, "LEVEL");
        fb.put_u32(panel_x, row, snap.level, value);

        let row = field(fb, "CLEARED");
        fb.put_u32(panel_x, row, snap.total_cleared, value);

        let row = field(fb, "TIME");
        let time_style = if snap.time_warning() {
            CellStyle::new(WARNING, Rgb::BLACK).bold()
        } else {
            value
        };
        fb.put_u64(panel_x, row, snap.time_display_secs(), time_style);

        let row = field(fb, "NEXT");
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, row, &next);
        }

        if snap.chain > 2 && snap.resolving() {
            // `chain` already points at the pass after the last clear
            let row = y.saturating_add(2);
            let end = fb.put_u32(panel_x, row, snap.chain - 1, label);
            fb.put_str(end, row, " CHAIN!", label);
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
        for (dx, dy, fruit) in piece.relative_cells() {
            if dx < 0 || dy < 0 {
                continue;
            }
            let style = CellStyle::new(Rgb::new(20, 20, 20), fruit_color(fruit)).bold();
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px, py, fruit.letter(), style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: &Frame) {
        let title = CellStyle::new(Rgb::WHITE, Rgb::BLACK).bold();
        let detail = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
        let mid_y = frame.y.saturating_add(frame.h / 2);

        let line = |fb: &mut FrameBuffer, dy: u16, text: &str, style: CellStyle| {
            fb.put_str_centered(frame.x, frame.w, mid_y.saturating_add(dy), text, style);
        };

        if snap.paused {
            line(fb, 0, "PAUSED", title);
            return;
        }

        match snap.phase {
            Phase::AwaitingStart => {
                line(fb, 0, "FRUIT DROP", title);
                line(fb, 2, "ENTER to start", detail);
            }
            Phase::StageClearing => {
                let text = format!("STAGE {} CLEAR!", snap.stage);
                line(fb, 0, &text, title);
                let score = format!("Score: {}", snap.score);
                line(fb, 2, &score, detail);
            }
            Phase::GameOver => {
                let reason = snap.game_over.map_or("GAME OVER", |r| r.as_str());
                line(fb, 0, reason, title);
                let score = format!("Final Score: {}", snap.score);
                line(fb, 2, &score, detail);
                if snap.new_record {
                    line(fb, 3, "NEW RECORD!", CellStyle::new(WARNING, Rgb::BLACK).bold());
                }
                line(fb, 5, "R restart  Q quit", detail);
            }
            Phase::Playing | Phase::Resolving => {}
        }
    }
}
