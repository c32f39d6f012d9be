//! Drawing surfaces.
//!
//! The simulation draws in a fixed logical coordinate space (see
//! [`render`](crate::render)). A [`Surface`] turns those calls into pixels,
//! character cells, or a recorded list for inspection.

use std::fmt;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal position, growing rightwards.
    pub x: i32,
    /// Vertical position, growing downwards.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Error from a single drawing operation.
///
/// Drawing errors are per call: the renderer logs them and carries on with
/// the rest of the frame.
#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    /// Writing to the underlying device failed.
    #[error("surface io error: {0}")]
    Io(#[from] std::io::Error),

    /// The text could not be rendered.
    #[error("failed to render text {text:?}: {reason}")]
    Text {
        /// The text that was being drawn.
        text: String,
        /// Why it failed.
        reason: String,
    },

    /// The surface has no drawable area.
    #[error("surface has zero size")]
    ZeroSize,
}

/// A specialized [`Result`] type for drawing operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Size in surface units of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

/// A display that accepts drawing commands.
///
/// Calls between two [`present`](Surface::present)s build up one frame.
pub trait Surface {
    /// Logical size of the surface.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgba) -> Result<()>;

    /// Draws the outline of `rect`.
    fn draw_rect(&mut self, rect: Rect, color: Rgba) -> Result<()>;

    /// Fills `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()>;

    /// Draws a line between two points, both ends included.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<()>;

    /// Draws a single point.
    fn draw_point(&mut self, at: Point, color: Rgba) -> Result<()>;

    /// Draws `text` with its top-left corner at `at` and returns how much
    /// space it took.
    fn draw_text(&mut self, text: &str, at: Point, fg: Rgba, bg: Rgba) -> Result<TextExtent>;

    /// Shows the frame built so far.
    fn present(&mut self) -> Result<()>;
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    /// [`Surface::clear`].
    Clear(Rgba),
    /// [`Surface::draw_rect`].
    Rect(Rect, Rgba),
    /// [`Surface::fill_rect`].
    FillRect(Rect, Rgba),
    /// [`Surface::draw_line`].
    Line(Point, Point, Rgba),
    /// [`Surface::draw_point`].
    Point(Point, Rgba),
    /// [`Surface::draw_text`].
    Text {
        /// The text.
        text: String,
        /// Top-left corner.
        at: Point,
        /// Foreground color.
        fg: Rgba,
        /// Background color.
        bg: Rgba,
    },
}

/// A surface that records calls instead of drawing.
///
/// Text is measured with a fixed cell size. Each [`present`] moves the
/// pending calls into the last presented frame.
///
/// [`present`]: Surface::present
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pending: Vec<DrawCall>,
    presented: Vec<DrawCall>,
    frames: u64,
}

impl RecordingSurface {
    /// Width of one character in surface units.
    pub const CHAR_WIDTH: u32 = 12;
    /// Height of one line of text in surface units.
    pub const LINE_HEIGHT: u32 = 24;

    /// Creates a recorder with the given logical size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pending: Vec::new(),
            presented: Vec::new(),
            frames: 0,
        }
    }

    /// Calls issued since the last present.
    #[must_use]
    pub fn pending(&self) -> &[DrawCall] {
        &self.pending
    }

    /// Calls making up the last presented frame.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.presented
    }

    /// Number of frames presented.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Text of every text call in the last presented frame, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.presented
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) -> Result<()> {
        self.pending.push(DrawCall::Clear(color));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        self.pending.push(DrawCall::Rect(rect, color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        self.pending.push(DrawCall::FillRect(rect, color));
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) -> Result<()> {
        self.pending.push(DrawCall::Line(from, to, color));
        Ok(())
    }

    fn draw_point(&mut self, at: Point, color: Rgba) -> Result<()> {
        self.pending.push(DrawCall::Point(at, color));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, fg: Rgba, bg: Rgba) -> Result<TextExtent> {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        self.pending.push(DrawCall::Text {
            text: text.to_string(),
            at,
            fg,
            bg,
        });
        Ok(TextExtent {
            w: chars.saturating_mul(Self::CHAR_WIDTH),
            h: Self::LINE_HEIGHT,
        })
    }

    fn present(&mut self) -> Result<()> {
        self.presented = std::mem::take(&mut self.pending);
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_display() {
        assert_eq!(Rgba::rgb(75, 255, 75).to_string(), "#4bff4bff");
        assert_eq!(Rgba::new(0, 0, 0, 0).to_string(), "#00000000");
    }

    #[test]
    fn test_recorder_collects_frame() {
        let mut surface = RecordingSurface::new(100, 50);
        surface.clear(Rgba::BLACK).unwrap();
        surface
            .draw_line(Point::new(0, 0), Point::new(10, 10), Rgba::WHITE)
            .unwrap();
        assert_eq!(surface.pending().len(), 2);
        assert!(surface.last_frame().is_empty());

        surface.present().unwrap();
        assert!(surface.pending().is_empty());
        assert_eq!(surface.last_frame().len(), 2);
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_recorder_measures_text() {
        let mut surface = RecordingSurface::new(100, 50);
        let extent = surface
            .draw_text("y = 1", Point::new(0, 0), Rgba::WHITE, Rgba::BLACK)
            .unwrap();
        assert_eq!(extent, TextExtent { w: 60, h: 24 });

        surface.present().unwrap();
        assert_eq!(surface.texts(), vec!["y = 1"]);
    }

    #[test]
    fn test_surface_error_messages() {
        let err = SurfaceError::Text {
            text: "abc".into(),
            reason: "no room".into(),
        };
        assert_eq!(err.to_string(), "failed to render text \"abc\": no room");
        assert_eq!(SurfaceError::ZeroSize.to_string(), "surface has zero size");
    }
}
