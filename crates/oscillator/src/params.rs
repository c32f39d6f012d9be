//! Physical parameters of the oscillator.
//!
//! Every parameter must stay finite and strictly positive. The integration
//! rule divides by both the mass and the damping constant, so this module is
//! the only guard against a division by zero.

use std::fmt;

/// Default mass in kilograms.
pub const DEFAULT_MASS: f64 = 5.0;

/// Default spring constant in newtons per metre.
pub const DEFAULT_SPRING_CONSTANT: f64 = 10.0;

/// Default damping constant in kilograms per second.
pub const DEFAULT_DAMPING_CONSTANT: f64 = 5.0;

/// Default unstretched spring length in metres.
pub const DEFAULT_UNSTRETCHED_LENGTH: f64 = 1.0;

/// Names one of the four oscillator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Mass `m`, kg.
    Mass,
    /// Spring constant `k`, N/m.
    SpringConstant,
    /// Damping constant `B`, kg/s.
    DampingConstant,
    /// Unstretched length `L`, m. Not part of the force equation.
    UnstretchedLength,
}

impl Parameter {
    /// All parameters, in display order.
    pub const ALL: [Self; 4] = [
        Self::Mass,
        Self::SpringConstant,
        Self::DampingConstant,
        Self::UnstretchedLength,
    ];

    /// Human-readable label including the conventional symbol.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mass => "Mass (m)",
            Self::SpringConstant => "Spring constant (k)",
            Self::DampingConstant => "Damping constant (B)",
            Self::UnstretchedLength => "Unstretched length (L)",
        }
    }

    /// Unit suffix used in readouts.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Mass => "kg",
            Self::SpringConstant => "N/M",
            Self::DampingConstant => "kg/s",
            Self::UnstretchedLength => "M",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a parameter value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// The value was zero, negative, NaN or infinite.
    #[error("{parameter} must be a finite number greater than zero, got {value}")]
    NotPositive {
        /// The parameter being set.
        parameter: Parameter,
        /// The rejected value.
        value: f64,
    },
}

/// Oscillator parameters.
///
/// Fields are private so that every value that reaches the integration step
/// has passed [`Params::check`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    mass: f64,
    spring_constant: f64,
    damping_constant: f64,
    unstretched_length: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            spring_constant: DEFAULT_SPRING_CONSTANT,
            damping_constant: DEFAULT_DAMPING_CONSTANT,
            unstretched_length: DEFAULT_UNSTRETCHED_LENGTH,
        }
    }
}

impl Params {
    /// Creates a parameter set, validating every value.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::NotPositive`] for the first value that is not
    /// finite and strictly positive.
    pub fn new(
        mass: f64,
        spring_constant: f64,
        damping_constant: f64,
        unstretched_length: f64,
    ) -> Result<Self, ParamError> {
        let mut params = Self::default();
        params.set(Parameter::Mass, mass)?;
        params.set(Parameter::SpringConstant, spring_constant)?;
        params.set(Parameter::DampingConstant, damping_constant)?;
        params.set(Parameter::UnstretchedLength, unstretched_length)?;
        Ok(params)
    }

    /// Checks that `value` is acceptable for `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::NotPositive`] if `value` is not finite or not
    /// greater than zero.
    pub fn check(parameter: Parameter, value: f64) -> Result<f64, ParamError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ParamError::NotPositive { parameter, value })
        }
    }

    /// Sets one parameter. On error the current value is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`Params::check`].
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<(), ParamError> {
        let value = Self::check(parameter, value)?;
        *self.slot(parameter) = value;
        Ok(())
    }

    /// Returns the value of one parameter.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Mass => self.mass,
            Parameter::SpringConstant => self.spring_constant,
            Parameter::DampingConstant => self.damping_constant,
            Parameter::UnstretchedLength => self.unstretched_length,
        }
    }

    /// Mass `m` in kg.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Spring constant `k` in N/m.
    #[inline]
    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    /// Damping constant `B` in kg/s.
    #[inline]
    pub fn damping_constant(&self) -> f64 {
        self.damping_constant
    }

    /// Unstretched length `L` in m.
    #[inline]
    pub fn unstretched_length(&self) -> f64 {
        self.unstretched_length
    }

    fn slot(&mut self, parameter: Parameter) -> &mut f64 {
        match parameter {
            Parameter::Mass => &mut self.mass,
            Parameter::SpringConstant => &mut self.spring_constant,
            Parameter::DampingConstant => &mut self.damping_constant,
            Parameter::UnstretchedLength => &mut self.unstretched_length,
        }
    }
}
