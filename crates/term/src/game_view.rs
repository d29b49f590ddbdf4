//! GameView: maps a game snapshot plus tile sprites into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::animation::{Mark, TileSprite};
use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::Position;

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

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Renders the grid, side panel and overlays.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 leaves room for five-digit values with padding.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered board in terminal cells
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.cols as u16 * self.cell_w + 2,
            snap.rows as u16 * self.cell_h + 2,
        )
    }

    /// Render a board at rest straight from the snapshot.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let sprites = snapshot_sprites(snap);
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, &sprites, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer.
    ///
    /// The grid comes from `sprites` so mid-transition frames can show tiles
    /// away from their snapshot cells; the panel and overlays come from `snap`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        sprites: &[TileSprite],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(BOARD_BG, Rgb::new(0, 0, 0));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let style = CellStyle::new(DARK_TEXT, EMPTY_BG).dim();
                self.fill_tile(fb, start_x, start_y, Position::new(row, col), style);
            }
        }

        for sprite in sprites {
            self.draw_tile(fb, start_x, start_y, sprite);
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", "r to restart");
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, at: Position, style: CellStyle) {
        let (px, py) = self.tile_origin(start_x, start_y, at);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, sprite: &TileSprite) {
        let bg = tile_color(sprite.value);
        let fg = if sprite.value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
        let mut style = CellStyle::new(fg, bg).bold();
        if sprite.mark == Mark::Spawned {
            style.bold = false;
        }
        self.fill_tile(fb, start_x, start_y, sprite.position, style);

        let (px, py) = self.tile_origin(start_x, start_y, sprite.position);
        let mid_y = py + self.cell_h / 2;
        let digits = digit_count(sprite.value as u64);
        let num_x = px + self.cell_w.saturating_sub(digits) / 2;
        fb.put_u64(num_x, mid_y, sprite.value as u64, style);

        if sprite.mark == Mark::Merged && self.cell_w >= 3 {
            fb.put_char(px, py, '+', style);
        }
    }

    fn tile_origin(&self, start_x: u16, start_y: u16, at: Position) -> (u16, u16) {
        (
            start_x + 1 + at.col as u16 * self.cell_w,
            start_y + 1 + at.row as u16 * self.cell_h,
        )
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let hint = CellStyle::default().dim();

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_tile as u64),
            ("MOVES", snap.moves as u64),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u64(panel_x, y + 1, number, value);
            y += 3;
        }

        if snap.won {
            fb.put_str(panel_x, y, "2048!", label);
            y += 2;
        }

        for line in ["arrows/wasd", "r restart", "q quit"] {
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        title: &str,
        subtitle: &str,
    ) {
        let mid_y = start_y + frame_h / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let inner_w = frame_w.saturating_sub(2);
        fb.fill_rect(start_x + 1, mid_y.saturating_sub(1), inner_w, 3, ' ', style);
        fb.put_str_centered(start_x + 1, mid_y.saturating_sub(1), inner_w, title, style);
        fb.put_str_centered(start_x + 1, mid_y + 1, inner_w, subtitle, CellStyle { bold: false, ..style });
    }
}

/// Width reserved right of the board for the side panel when centring
const PANEL_W: u16 = 14;

/// Sprites for every tile in a snapshot, unmarked
pub fn snapshot_sprites(snap: &GameSnapshot) -> Vec<TileSprite> {
    let mut sprites = Vec::new();
    for row in 0..snap.rows {
        for col in 0..snap.cols {
            let value = snap.value(row, col);
            if value != 0 {
                sprites.push(TileSprite {
                    value,
                    position: Position::new(row, col),
                    mark: Mark::None,
                });
            }
        }
    }
    sprites
}

fn tile_color(value: u32) -> Rgb {
    match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    }
}

fn digit_count(mut n: u64) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(2), 1);
        assert_eq!(digit_count(64), 2);
        assert_eq!(digit_count(2048), 4);
        assert_eq!(digit_count(131072), 6);
    }

    #[test]
    fn large_values_share_a_fallback_color() {
        assert_eq!(tile_color(4096), tile_color(8192));
        assert_ne!(tile_color(2), tile_color(4));
    }

    #[test]
    fn snapshot_sprites_skip_empty_cells() {
        let mut snap = GameSnapshot::default();
        snap.cells[0][1] = 2;
        snap.cells[3][3] = 8;
        let sprites = snapshot_sprites(&snap);
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].position, Position::new(0, 1));
        assert_eq!(sprites[1].value, 8);
    }
}
