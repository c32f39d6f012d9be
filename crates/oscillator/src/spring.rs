//! Mass-spring-damper motion and its integration step.
//!
//! The step below is not a textbook Euler variant. The displacement is
//! advanced with a velocity solved from the force balance using the
//! *previous* step's acceleration and divided by the damping constant,
//! while the velocity is advanced with the freshly computed acceleration.
//! Visualizations and recorded traces depend on this exact rule, so it is
//! reproduced as is.

use crate::params::{ParamError, Parameter, Params};

/// Returns a time delta for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use oscillator::fps;
///
/// assert_eq!(fps(60), 1.0 / 60.0);
/// ```
#[inline]
pub const fn fps(n: u32) -> f64 {
    1.0 / n as f64
}

/// Kinematic state of the mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Displacement.
    pub y: f64,
    /// Velocity, `dy/dt`.
    pub yp: f64,
    /// Acceleration, `d²y/dt²`.
    pub ypp: f64,
}

impl Motion {
    /// Displacement the mass is released from.
    pub const INITIAL_DISPLACEMENT: f64 = 1.0;
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            y: Self::INITIAL_DISPLACEMENT,
            yp: 0.0,
            ypp: 0.0,
        }
    }
}

/// A damped harmonic oscillator: parameters plus motion.
///
/// # Example
///
/// ```rust
/// use oscillator::{Motion, Oscillator, Params, fps};
///
/// let params = Params::new(1.0, 4.0, 0.5, 1.0).unwrap();
/// let mut osc = Oscillator::new(params);
///
/// for _ in 0..600 {
///     osc.integrate(fps(600));
/// }
///
/// osc.reset_motion();
/// assert_eq!(osc.motion(), Motion::default());
/// assert_eq!(osc.params(), params);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Oscillator {
    params: Params,
    motion: Motion,
}

impl Oscillator {
    /// Creates an oscillator at the default motion state.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            motion: Motion::default(),
        }
    }

    /// Current parameters.
    #[inline]
    pub fn params(&self) -> Params {
        self.params
    }

    /// Current motion state.
    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Sets one parameter, keeping the motion state.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `value` is not finite and positive; the
    /// parameter is left unchanged.
    pub fn set_param(&mut self, parameter: Parameter, value: f64) -> Result<(), ParamError> {
        self.params.set(parameter, value)
    }

    /// Returns the motion to its initial state, keeping the parameters.
    pub fn reset_motion(&mut self) {
        self.motion = Motion::default();
    }

    /// Returns both the parameters and the motion to their defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Acceleration from the force balance `-k·y - B·yp = m·ypp`.
    #[inline]
    fn acceleration(&self, y: f64, yp: f64) -> f64 {
        (-self.params.spring_constant() * y - self.params.damping_constant() * yp)
            / self.params.mass()
    }

    /// Advances the motion by `dt` seconds and returns the new displacement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oscillator::Oscillator;
    ///
    /// let mut osc = Oscillator::default();
    /// let y = osc.integrate(1.0 / 600.0);
    /// assert_eq!(y, osc.motion().y);
    /// ```
    #[inline]
    pub fn integrate(&mut self, dt: f64) -> f64 {
        let m = self.params.mass();
        let k = self.params.spring_constant();
        let b = self.params.damping_constant();
        let Motion { y, yp, ypp } = self.motion;

        let provisional_ypp = self.acceleration(y, yp);
        let provisional_yp = (-k * y - m * ypp) / b;

        let y = y + provisional_yp * dt;
        let yp = yp + provisional_ypp * dt;

        self.motion = Motion {
            y,
            yp,
            ypp: self.acceleration(y, yp),
        };
        y
    }
}
