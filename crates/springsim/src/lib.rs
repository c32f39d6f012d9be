#![forbid(unsafe_code)]

//! # Springsim
//!
//! A damped harmonic oscillator drawn live in the terminal: the bouncing
//! mass, a readout of parameters and motion, and a strip chart of
//! displacement over time.
//!
//! The library holds everything the `springsim` binary runs, so the
//! integration tests can drive the same code headlessly.
//!
//! ## Public Modules
//!
//! - [`simulation`] - Per-frame loop: input, physics, render
//! - [`history`] - Bounded displacement history
//! - [`render`] - Frame layout and drawing
//! - [`surface`] - Drawing interface and a recording implementation
//! - [`canvas`] - Terminal character-grid surface
//! - [`input`], [`key`], [`command`], [`prompt`] - Keys, bindings and the
//!   modal number prompt
//! - [`program`] - Interactive terminal runner
//! - [`headless`] - Self-check without a terminal
//! - [`cli`], [`config`], [`logging`] - Runtime options and log setup

pub mod canvas;
pub mod cli;
pub mod command;
pub mod config;
pub mod headless;
pub mod history;
pub mod input;
pub mod key;
pub mod logging;
pub mod program;
pub mod prompt;
pub mod render;
pub mod simulation;
pub mod surface;
