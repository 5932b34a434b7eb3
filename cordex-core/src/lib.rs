//! Preprocessing helpers for CORDEX regional climate model output
//!
//! - [`climatology`]: monthly means, harmonic fits and anomaly series of gridded data
//! - [`harmonic`]: the annual plus semiannual least squares model behind the fits
//! - [`catalog`]: discovery and organisation of dataset folders on disk
//! - [`registry`]: per-simulation records tying data and climatology together

pub mod catalog;
pub mod climatology;
pub mod harmonic;
pub mod labels;
pub mod python;
pub mod registry;
pub mod utils;

pub mod errors;
