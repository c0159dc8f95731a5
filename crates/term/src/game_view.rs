//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure: no I/O, so it can be unit-tested.

use crate::core::{color, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const SCREEN_BG: Rgb = Rgb::new(0x11, 0x11, 0x11);
const WELL_BG: Rgb = Rgb::new(0x22, 0x22, 0x22);
const BORDER_FG: Rgb = Rgb::new(0x66, 0x66, 0x66);
const TEXT_FG: Rgb = Rgb::new(0xdd, 0xdd, 0xdd);
const PREVIEW_BG: Rgb = Rgb::new(0x33, 0x33, 0x33);

/// Side of the next-piece preview grid, in board cells
const PREVIEW_SIDE: u16 = 4;
/// Gap between the well and the side panel
const PANEL_GAP: u16 = 2;
const PANEL_MIN_W: u16 = 12;

const HELP: [&str; 7] = [
    "←/→  move",
    "↓    down",
    "↑    rotate",
    "SPC  drop",
    "P    pause",
    "R    restart",
    "Q    quit",
];

/// Status line shown above the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
    GameOver,
}

impl Status {
    pub fn of(snap: &GameSnapshot) -> Self {
        if snap.game_over {
            Status::GameOver
        } else if snap.paused {
            Status::Paused
        } else {
            Status::Playing
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Playing => "PLAYING",
            Status::Paused => "PAUSED",
            Status::GameOver => "GAME OVER",
        }
    }

    fn badge(self) -> CellStyle {
        let bg = match self {
            Status::Playing => Rgb::new(0x00, 0xff, 0x00),
            Status::Paused => Rgb::new(0xff, 0xaa, 0x00),
            Status::GameOver => Rgb::new(0xff, 0x00, 0x00),
        };
        CellStyle::new(Rgb::new(0, 0, 0), bg).bold()
    }
}

/// Renders the well, the side panel and the pause / game over overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Width and height of the bordered well
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Top-left corner of the well for a viewport
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let total_w = frame_w + PANEL_GAP + PANEL_MIN_W;
        let x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        (x, viewport.height.saturating_sub(frame_h) / 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT_FG, SCREEN_BG).cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);
        self.draw_well(fb, snap, start_x, start_y);
        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + PANEL_GAP, start_y);

        match Status::of(snap) {
            Status::Paused => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED", "P: resume"]);
            }
            Status::GameOver => {
                self.draw_overlay(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["GAME OVER", "SPC: restart"],
                );
            }
            Status::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(BORDER_FG, SCREEN_BG);

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

    /// Locked cells with the active piece drawn over them
    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, start_y: u16) {
        let grid = snap.composited_board();
        let empty = CellStyle::new(Rgb::new(0x44, 0x44, 0x44), WELL_BG).dim();

        for (y, row) in grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let px = start_x + 1 + x as u16 * self.cell_w;
                let py = start_y + 1 + y as u16;
                match PieceKind::from_u8(code) {
                    Some(kind) => self.draw_block(fb, px, py, kind),
                    None => {
                        fb.fill_rect(px, py, self.cell_w, 1, ' ', empty);
                        fb.put_char(px, py, '·', empty);
                    }
                }
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, px: u16, py: u16, kind: PieceKind) {
        let style = CellStyle::new(color(kind), WELL_BG).bold();
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(0xaa, 0xaa, 0xaa), SCREEN_BG);
        let value = CellStyle::new(TEXT_FG, SCREEN_BG).bold();

        let status = Status::of(snap);
        let mut y = start_y;
        let badge = status.badge();
        fb.fill_rect(panel_x, y, PANEL_MIN_W, 1, ' ', badge);
        fb.put_str(panel_x + 1, y, status.label(), badge);
        y += 2;

        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &group_thousands(n), value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, snap.next, panel_x, y);
        y += PREVIEW_SIDE + 1;

        let help = CellStyle::new(Rgb::new(0x88, 0x88, 0x88), SCREEN_BG);
        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    /// Fixed 4x4 grid; empty when there is no next piece
    fn draw_preview(&self, fb: &mut FrameBuffer, next: Option<PieceKind>, x: u16, y: u16) {
        let empty = CellStyle::new(PREVIEW_BG, PREVIEW_BG);
        fb.fill_rect(x, y, PREVIEW_SIDE * self.cell_w, PREVIEW_SIDE, ' ', empty);

        let Some(kind) = next else {
            return;
        };
        let style = CellStyle::new(color(kind), PREVIEW_BG).bold();
        for (r, c) in crate::core::shape(kind).occupied() {
            fb.fill_rect(
                x + c as u16 * self.cell_w,
                y + r as u16,
                self.cell_w,
                1,
                '█',
                style,
            );
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(0xff, 0xff, 0xff), Rgb::new(0, 0, 0)).bold();
        let top = start_y + frame_h / 2 - lines.len() as u16 / 2;
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
