#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]

//! # Oscillator
//!
//! A mass-spring-damper system advanced in fixed time steps.
//!
//! The crate provides:
//! - **Params**: mass, spring constant, damping constant and unstretched
//!   length, all kept strictly positive
//! - **Motion**: displacement, velocity and acceleration
//! - **Oscillator**: the two together, with a single [`Oscillator::integrate`]
//!   step
//!
//! ## Example
//!
//! ```rust
//! use oscillator::{Oscillator, fps};
//!
//! let mut osc = Oscillator::default();
//!
//! // One 60 FPS frame, split into ten sub-steps
//! for _ in 0..10 {
//!     osc.integrate(fps(600));
//! }
//!
//! // Released from y = 1.0, the mass starts moving back toward rest
//! assert!(osc.motion().y < 1.0);
//! ```
//!
//! ## Parameter edits
//!
//! ```rust
//! use oscillator::{Oscillator, Parameter};
//!
//! let mut osc = Oscillator::default();
//! assert!(osc.set_param(Parameter::Mass, 12.5).is_ok());
//! assert!(osc.set_param(Parameter::Mass, 0.0).is_err());
//! assert_eq!(osc.params().mass(), 12.5);
//! ```

mod params;
mod spring;

pub use params::{
    DEFAULT_DAMPING_CONSTANT, DEFAULT_MASS, DEFAULT_SPRING_CONSTANT, DEFAULT_UNSTRETCHED_LENGTH,
    ParamError, Parameter, Params,
};
pub use spring::{Motion, Oscillator, fps};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::params::{ParamError, Parameter, Params};
    pub use crate::spring::{Motion, Oscillator, fps};
}
