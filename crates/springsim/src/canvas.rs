//! A [`Surface`] backed by the terminal's character grid.
//!
//! Shapes are scaled from the logical surface onto cells. Text is not
//! scaled: it sits on a fixed grid of one terminal row per
//! [`TEXT_LINE_HEIGHT`] logical units, so status lines never overlap.
//! Presenting redraws the whole grid, but only when it changed since the
//! last present.

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::surface::{Point, Rect, Result, Rgba, Surface, SurfaceError, TextExtent};

/// Logical height of one line of text.
pub const TEXT_LINE_HEIGHT: i32 = 24;

const POINT_GLYPH: char = '•';
const BLOCK_GLYPH: char = '█';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Rgba,
    bg: Rgba,
}

impl Cell {
    const BLANK: Self = Self {
        ch: ' ',
        fg: Rgba::WHITE,
        bg: Rgba::BLACK,
    };
}

/// Character-cell canvas presenting to a terminal writer.
pub struct TerminalCanvas<W: Write> {
    writer: W,
    width: u32,
    height: u32,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    shown: Vec<Cell>,
    color: bool,
}

impl<W: Write> TerminalCanvas<W> {
    /// Creates a canvas mapping a `width`×`height` logical surface onto
    /// `cols`×`rows` cells.
    pub fn new(writer: W, width: u32, height: u32, cols: u16, rows: u16) -> Self {
        let len = usize::from(cols) * usize::from(rows);
        Self {
            writer,
            width,
            height,
            cols,
            rows,
            cells: vec![Cell::BLANK; len],
            shown: Vec::new(),
            color: true,
        }
    }

    /// Enables or disables color output.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Grid size in cells.
    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Changes the grid size. The next present redraws everything.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; usize::from(cols) * usize::from(rows)];
        self.invalidate();
    }

    /// Forgets what was last presented so the next present redraws.
    pub fn invalidate(&mut self) {
        self.shown.clear();
    }

    /// Glyph currently in a cell of the frame being built.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        self.index(i64::from(col), i64::from(row))
            .map(|i| self.cells[i].ch)
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn ensure_drawable(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 || self.width == 0 || self.height == 0 {
            return Err(SurfaceError::ZeroSize);
        }
        Ok(())
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        let cols = usize::from(self.cols);
        (col < cols && row < usize::from(self.rows)).then(|| row * cols + col)
    }

    fn to_col(&self, x: i32) -> i64 {
        i64::from(x) * i64::from(self.cols) / i64::from(self.width)
    }

    fn to_row(&self, y: i32) -> i64 {
        i64::from(y) * i64::from(self.rows) / i64::from(self.height)
    }

    fn to_cell(&self, p: Point) -> (i64, i64) {
        (self.to_col(p.x), self.to_row(p.y))
    }

    /// Sets glyph and foreground, keeping the cell's background.
    fn plot(&mut self, col: i64, row: i64, ch: char, fg: Rgba) {
        if let Some(i) = self.index(col, row) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn write_frame(&mut self) -> std::io::Result<()> {
        let cols = usize::from(self.cols);
        let mut current: Option<(Rgba, Rgba)> = None;

        for (row, line) in self.cells.chunks(cols.max(1)).enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.writer, MoveTo(0, row))?;
            let mut run = String::with_capacity(cols);

            for cell in line {
                if self.color && current != Some((cell.fg, cell.bg)) {
                    if !run.is_empty() {
                        queue!(self.writer, Print(&run))?;
                        run.clear();
                    }
                    queue!(
                        self.writer,
                        SetForegroundColor(to_color(cell.fg)),
                        SetBackgroundColor(to_color(cell.bg))
                    )?;
                    current = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            queue!(self.writer, Print(&run))?;
        }

        if self.color {
            queue!(self.writer, ResetColor)?;
        }
        self.writer.flush()
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn line_glyph(from: (i64, i64), to: (i64, i64)) -> char {
    if from.0 == to.0 {
        '│'
    } else if from.1 == to.1 {
        '─'
    } else {
        POINT_GLYPH
    }
}

/// Clips a cell segment to `(0, 0)..=last` (Liang-Barsky).
///
/// Segments already inside are returned unchanged. `None` means nothing
/// of the segment is on the grid.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::float_cmp
)]
fn clip_line(
    start: (i64, i64),
    end: (i64, i64),
    last: (i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    let inside =
        |(col, row): (i64, i64)| (0..=last.0).contains(&col) && (0..=last.1).contains(&row);
    if inside(start) && inside(end) {
        return Some((start, end));
    }

    let (x0, y0) = (start.0 as f64, start.1 as f64);
    let dx = (end.0 - start.0) as f64;
    let dy = (end.1 - start.1) as f64;
    let (max_x, max_y) = (last.0 as f64, last.1 as f64);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        let col = (x0 + t * dx).round() as i64;
        let row = (y0 + t * dy).round() as i64;
        (col.clamp(0, last.0), row.clamp(0, last.1))
    };
    Some((at(t0), at(t1)))
}

impl<W: Write> Surface for TerminalCanvas<W> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) -> Result<()> {
        self.ensure_drawable()?;
        self.cells.fill(Cell {
            ch: ' ',
            fg: Rgba::WHITE,
            bg: color,
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        self.ensure_drawable()?;
        let (c0, r0) = self.to_cell(Point::new(rect.x, rect.y));
        let right = rect.x.saturating_add_unsigned(rect.w.saturating_sub(1));
        let bottom = rect.y.saturating_add_unsigned(rect.h.saturating_sub(1));
        let (c1, r1) = self.to_cell(Point::new(right, bottom));

        // Too small to show an outline
        if c0 == c1 || r0 == r1 {
            return self.fill_rect(rect, color);
        }

        let (cols, rows) = (i64::from(self.cols), i64::from(self.rows));
        for col in (c0 + 1).max(0)..c1.min(cols) {
            self.plot(col, r0, '─', color);
            self.plot(col, r1, '─', color);
        }
        for row in (r0 + 1).max(0)..r1.min(rows) {
            self.plot(c0, row, '│', color);
            self.plot(c1, row, '│', color);
        }
        self.plot(c0, r0, '┌', color);
        self.plot(c1, r0, '┐', color);
        self.plot(c0, r1, '└', color);
        self.plot(c1, r1, '┘', color);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        self.ensure_drawable()?;
        let (c0, r0) = self.to_cell(Point::new(rect.x, rect.y));
        let right = rect.x.saturating_add_unsigned(rect.w.saturating_sub(1));
        let bottom = rect.y.saturating_add_unsigned(rect.h.saturating_sub(1));
        let (c1, r1) = self.to_cell(Point::new(right, bottom));

        let (last_col, last_row) = (i64::from(self.cols) - 1, i64::from(self.rows) - 1);
        for row in r0.max(0)..=r1.min(last_row) {
            for col in c0.max(0)..=c1.min(last_col) {
                self.plot(col, row, BLOCK_GLYPH, color);
            }
        }
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<()> {
        self.ensure_drawable()?;
        let start = self.to_cell(from);
        let end = self.to_cell(to);
        let glyph = line_glyph(start, end);

        let last = (i64::from(self.cols) - 1, i64::from(self.rows) - 1);
        let Some((start, end)) = clip_line(start, end, last) else {
            return Ok(());
        };

        // Bresenham over cells
        let (mut col, mut row) = start;
        let dx = (end.0 - col).abs();
        let dy = -(end.1 - row).abs();
        let sx = if col < end.0 { 1 } else { -1 };
        let sy = if row < end.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(col, row, glyph, color);
            if (col, row) == end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                col += sx;
            }
            if e2 <= dx {
                err += dx;
                row += sy;
            }
        }
        Ok(())
    }

    fn draw_point(&mut self, at: Point, color: Rgba) -> Result<()> {
        self.ensure_drawable()?;
        let (col, row) = self.to_cell(at);
        self.plot(col, row, POINT_GLYPH, color);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, fg: Rgba, bg: Rgba) -> Result<TextExtent> {
        self.ensure_drawable()?;
        let row = i64::from(at.y.div_euclid(TEXT_LINE_HEIGHT));
        if row < 0 || row >= i64::from(self.rows) {
            return Err(SurfaceError::Text {
                text: text.to_string(),
                reason: format!("line {row} is outside {} rows", self.rows),
            });
        }

        let start = self.to_col(at.x);
        let mut drawn: u32 = 0;
        for (offset, ch) in (0_i64..).zip(text.chars()) {
            if let Some(i) = self.index(start + offset, row) {
                self.cells[i] = Cell { ch, fg, bg };
                drawn += 1;
            }
        }

        let cell_width = self.width / u32::from(self.cols);
        Ok(TextExtent {
            w: drawn.saturating_mul(cell_width.max(1)),
            h: TEXT_LINE_HEIGHT.unsigned_abs(),
        })
    }

    fn present(&mut self) -> Result<()> {
        self.ensure_drawable()?;
        if self.cells == self.shown {
            return Ok(());
        }
        if self.shown.is_empty() {
            queue!(self.writer, Clear(ClearType::All))?;
        }
        self.write_frame()?;
        self.shown.clone_from(&self.cells);
        Ok(())
    }
}
