/// Rendering layer. All terminal I/O lives here.
///
/// `TerminalRenderer` implements the simulation's `Renderer` contract by
/// scaling arena coordinates onto the terminal grid. Draw calls land in a
/// cell buffer; `present` queues the whole frame to the writer and flushes.
/// No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::compute::{ARENA_HEIGHT, ARENA_WIDTH};
use space_shooter::entities::Sprite;
use space_shooter::interface::Renderer;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

/// Below this alpha a draw call is treated as invisible.
const MIN_VISIBLE_ALPHA: u8 = 40;

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

pub struct TerminalRenderer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl TerminalRenderer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut renderer = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        renderer.resize(width, height);
        renderer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width.max(4);
        self.height = height.max(4);
        self.cells = vec![BLANK; self.width as usize * self.height as usize];
    }

    /// Start a new frame.
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Play-field rows sit between the top and bottom border rows; columns
    /// between the side walls.
    fn field(&self) -> (u16, u16) {
        (self.width.saturating_sub(2), self.height.saturating_sub(3))
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let (cols, rows) = self.field();
        let col = (x / ARENA_WIDTH * cols as f32).floor() as i32 + 1;
        let row = (y / ARENA_HEIGHT * rows as f32).floor() as i32 + 1;
        (col, row)
    }

    fn put(&mut self, col: i32, row: i32, glyph: char, color: Color) {
        let (cols, rows) = self.field();
        if col < 1 || row < 1 || col > cols as i32 || row > rows as i32 {
            return;
        }
        let index = row as usize * self.width as usize + col as usize;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Cell { glyph, color };
        }
    }

    /// Queue the buffered frame plus border and hint, then flush.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border(out)?;

        let mut current = Color::Reset;
        for row in 0..self.height {
            let start = row as usize * self.width as usize;
            let line = &self.cells[start..start + self.width as usize];
            for (col, cell) in line.iter().enumerate() {
                if cell.glyph == ' ' {
                    continue;
                }
                if cell.color != current {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                out.queue(cursor::MoveTo(col as u16, row))?;
                out.queue(Print(cell.glyph))?;
            }
        }

        out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("ARROWS / WASD : Move   SPACE : Fire   ENTER : Confirm   Q : Quit"))?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    fn draw_border<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.width as usize;
        let h = self.height;

        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 1..h.saturating_sub(2) {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }
        Ok(())
    }
}

fn rgb(rgba: [u8; 4]) -> Color {
    Color::Rgb {
        r: rgba[0],
        g: rgba[1],
        b: rgba[2],
    }
}

impl Renderer for TerminalRenderer {
    /// The sprite's scaled box filled with its glyph, at least one cell.
    /// Rotation is not representable on the grid and is ignored.
    fn render_sprite(
        &mut self,
        sprite: Sprite,
        x: f32,
        y: f32,
        _angle: f32,
        scale: f32,
        rgba: [u8; 4],
    ) {
        if rgba[3] < MIN_VISIBLE_ALPHA || sprite.w <= 0 || sprite.h <= 0 {
            return;
        }
        let (left, top) = self.to_cell(x, y);
        let (right, bottom) = self.to_cell(
            x + sprite.w as f32 * scale,
            y + sprite.h as f32 * scale,
        );
        let color = rgb(rgba);
        for row in top..bottom.max(top + 1) {
            for col in left..right.max(left + 1) {
                self.put(col, row, sprite.glyph, color);
            }
        }
    }

    fn render_text(&mut self, text: &str, x: f32, y: f32, rgba: [u8; 4]) {
        if rgba[3] < MIN_VISIBLE_ALPHA {
            return;
        }
        let (col, row) = self.to_cell(x, y);
        let color = rgb(rgba);
        for (offset, glyph) in text.chars().enumerate() {
            self.put(col + offset as i32, row, glyph, color);
        }
    }
}
