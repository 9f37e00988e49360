//! Deconflict CLI - command line front end for the deconfliction engine.
//!
//! This crate provides:
//! - deconflict: scan a mission or a fleet from JSON input, or run demos
//! - fleet_stress: random fleet sweep benchmark

pub mod config;
pub mod input;
pub mod logging;
pub mod output;
pub mod scenarios;

pub use config::{Config, LogFormat};
