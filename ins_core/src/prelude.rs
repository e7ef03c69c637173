// ins_core/src/prelude.rs

// --- Core Data Structures ---
pub use crate::inertial::{InertialParameters, SensorCalibration};
pub use crate::params::AlgorithmParameters;

// --- Sharing across estimators ---
pub use crate::shared::{ParameterSnapshot, SharedParameters};

// --- Errors ---
pub use crate::error::{ParamsError, Result};
