//! Frame composition.
//!
//! Everything is laid out in a fixed 1280×720 logical space:
//!
//! ```text
//!  status lines (0..168)        spring (x = 640)
//!  ┌──────────────────────┐          │
//!  │ Mass (m): ...        │          │
//!  │ ...                  │        ┌─┴─┐  mass, 40×40 at x = 620,
//!  └──────────────────────┘        └───┘  top at y·200 + 300
//!  │ (x = 40, from 360 to the bottom edge)
//!  ├─────────────────────────── strip chart baseline y = 540
//!  │ one point per column, 540 + sample·100
//! ```
//!
//! A failed drawing call is logged and skipped; the rest of the frame is
//! still drawn.

use oscillator::Parameter;

use crate::simulation::SimState;
use crate::surface::{Point, Rect, Rgba, Surface, SurfaceError};

/// Logical surface width.
pub const SCREEN_WIDTH: u32 = 1280;
/// Logical surface height.
pub const SCREEN_HEIGHT: u32 = 720;

/// Vertical spacing of status lines.
pub const LINE_SPACING: i32 = 24;

const MASS_X: i32 = 620;
const MASS_SIZE: u32 = 40;
const SPRING_X: i32 = 640;
const DISPLACEMENT_SCALE: f64 = 200.0;
const DISPLACEMENT_OFFSET: f64 = 300.0;

const CHART_LEFT: i32 = 40;
const CHART_RIGHT: i32 = 1240;
const CHART_TOP: i32 = 360;
const CHART_BASELINE: i32 = 540;
const CHART_SCALE: f64 = 100.0;

const TEXT_FG: Rgba = Rgba::WHITE;
const TEXT_BG: Rgba = Rgba::BLACK;
const MASS_COLOR: Rgba = Rgba::rgb(0, 255, 0);
const SPRING_COLOR: Rgba = Rgba::rgb(0, 0, 255);
const AXIS_COLOR: Rgba = Rgba::WHITE;
const TRACE_COLOR: Rgba = Rgba::rgb(75, 255, 75);

/// Parameters shown in the readout, top to bottom.
const READOUT: [Parameter; 3] = [
    Parameter::Mass,
    Parameter::SpringConstant,
    Parameter::DampingConstant,
];

/// Counts of drawing calls issued for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Calls issued, including the final present.
    pub calls: usize,
    /// Calls that failed.
    pub failures: usize,
}

impl RenderStats {
    fn track<T>(&mut self, what: &str, result: Result<T, SurfaceError>) {
        self.calls += 1;
        if let Err(err) = result {
            self.failures += 1;
            tracing::warn!(call = what, error = %err, "draw call failed");
        }
    }
}

/// Screen row of the top edge of the mass for displacement `y`.
///
/// Fractions are truncated toward zero.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mass_top(y: f64) -> i32 {
    (y * DISPLACEMENT_SCALE + DISPLACEMENT_OFFSET) as i32
}

/// Screen position of history sample `index`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn chart_point(index: usize, sample: f64) -> Point {
    Point::new(
        CHART_LEFT + index as i32,
        (f64::from(CHART_BASELINE) + sample * CHART_SCALE) as i32,
    )
}

/// The six readout lines: three parameters, then `y`, `yp` and `ypp`.
#[must_use]
pub fn status_lines(state: &SimState) -> Vec<(i32, String)> {
    let params = state.oscillator.params();
    let motion = state.oscillator.motion();

    let mut lines: Vec<(i32, String)> = READOUT
        .iter()
        .zip(0..)
        .map(|(&parameter, row)| {
            (
                row * LINE_SPACING,
                format!(
                    "{}: {:.6} {}",
                    parameter.label(),
                    params.get(parameter),
                    parameter.unit()
                ),
            )
        })
        .collect();

    // One blank line between the two groups
    lines.push((4 * LINE_SPACING, format!("y = {:.6}", motion.y)));
    lines.push((5 * LINE_SPACING, format!("dy/dt = {:.6}", motion.yp)));
    lines.push((6 * LINE_SPACING, format!("d²y/dt² = {:.6}", motion.ypp)));
    lines
}

/// Draws one frame of `state` onto `surface` and presents it.
pub fn render<S: Surface + ?Sized>(state: &SimState, surface: &mut S) -> RenderStats {
    let mut stats = RenderStats::default();

    stats.track("clear", surface.clear(Rgba::BLACK));

    for (y, line) in status_lines(state) {
        stats.track(
            "text",
            surface.draw_text(&line, Point::new(0, y), TEXT_FG, TEXT_BG),
        );
    }

    let top = mass_top(state.oscillator.motion().y);
    stats.track(
        "mass",
        surface.draw_rect(Rect::new(MASS_X, top, MASS_SIZE, MASS_SIZE), MASS_COLOR),
    );
    stats.track(
        "spring",
        surface.draw_line(Point::new(SPRING_X, 0), Point::new(SPRING_X, top), SPRING_COLOR),
    );

    // The vertical axis runs to the bottom edge
    let (_, height) = surface.size();
    stats.track(
        "axis",
        surface.draw_line(
            Point::new(CHART_LEFT, CHART_TOP),
            Point::new(CHART_LEFT, i32::try_from(height).unwrap_or(i32::MAX)),
            AXIS_COLOR,
        ),
    );
    stats.track(
        "axis",
        surface.draw_line(
            Point::new(CHART_LEFT, CHART_BASELINE),
            Point::new(CHART_RIGHT, CHART_BASELINE),
            AXIS_COLOR,
        ),
    );

    for (index, sample) in state.history.iter().enumerate() {
        stats.track("trace", surface.draw_point(chart_point(index, sample), TRACE_COLOR));
    }

    stats.track("present", surface.present());

    if stats.failures > 0 {
        tracing::debug!(
            failures = stats.failures,
            calls = stats.calls,
            "frame drawn with errors"
        );
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_top() {
        assert_eq!(mass_top(1.0), 500);
        assert_eq!(mass_top(0.0), 300);
        assert_eq!(mass_top(-1.0), 100);
        // 0.9964 * 200 + 300 = 499.28, truncated
        assert_eq!(mass_top(0.9964), 499);
    }

    #[test]
    fn test_chart_point() {
        assert_eq!(chart_point(0, 0.0), Point::new(40, 540));
        assert_eq!(chart_point(10, 1.0), Point::new(50, 640));
        assert_eq!(chart_point(1199, -0.5), Point::new(1239, 490));
    }

    #[test]
    fn test_status_lines_defaults() {
        let state = SimState::default();
        let lines = status_lines(&state);

        let rows: Vec<i32> = lines.iter().map(|(y, _)| *y).collect();
        assert_eq!(rows, vec![0, 24, 48, 96, 120, 144]);

        assert_eq!(lines[0].1, "Mass (m): 5.000000 kg");
        assert_eq!(lines[1].1, "Spring constant (k): 10.000000 N/M");
        assert_eq!(lines[2].1, "Damping constant (B): 5.000000 kg/s");
        assert_eq!(lines[3].1, "y = 1.000000");
        assert_eq!(lines[4].1, "dy/dt = 0.000000");
        assert_eq!(lines[5].1, "d²y/dt² = 0.000000");
    }
}
