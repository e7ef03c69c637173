// ins_core/src/config.rs

//! Builds `AlgorithmParameters` from configuration sources and runs the
//! validation step on the result.
//!
//! The expected layout is a top-level `[inertial]` table:
//!
//! ```toml
//! [inertial]
//! lever_arm = [0.10, 0.0, -0.05]
//!
//! [inertial.gyro]
//! bias = [0.001, -0.002, 0.0]
//! misalignment = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
//!
//! [inertial.accel]
//! scale_factor = [1.01, 0.99, 1.0]
//! ```
//!
//! Anything left out keeps its nominal value. Unknown keys are rejected.
//! This module never touches the filesystem; callers decide which providers
//! (e.g. `Toml::file`) go into the `Figment`.

use figment::{
    providers::{Format, Toml},
    Figment,
};
use tracing::debug;

use crate::error::Result;
use crate::params::AlgorithmParameters;

/// Extracts parameters from `figment` and validates them.
pub fn extract(figment: &Figment) -> Result<AlgorithmParameters> {
    let params: AlgorithmParameters = figment.extract()?;
    params.inertial().validate()?;

    debug!(
        lever_arm = ?params.inertial().lever_arm.as_slice(),
        "Extracted INS algorithm parameters."
    );
    Ok(params)
}

/// Convenience wrapper over [`extract`] for an in-memory TOML document.
pub fn from_toml_str(toml: &str) -> Result<AlgorithmParameters> {
    extract(&Figment::new().merge(Toml::string(toml)))
}
