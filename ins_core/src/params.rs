// ins_core/src/params.rs

use crate::inertial::InertialParameters;
use serde::{Deserialize, Serialize};

/// # AlgorithmParameters
/// The configuration aggregate handed to an inertial navigation algorithm when
/// it is constructed. It owns its `inertial` group by value: cloning the
/// aggregate clones the calibration, and nothing else can alias it.
///
/// Construction never validates. Run `InertialParameters::validate` on the
/// producing side (the `config` module does this) before building one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmParameters {
    /// IMU physical and calibration constants.
    #[serde(default)]
    pub inertial: InertialParameters,
}

impl AlgorithmParameters {
    pub fn new(inertial: InertialParameters) -> Self {
        Self { inertial }
    }

    pub fn inertial(&self) -> &InertialParameters {
        &self.inertial
    }

    /// Mutable access for the exclusive owner. For calibration that changes
    /// while other consumers are reading it, use `SharedParameters` instead.
    pub fn inertial_mut(&mut self) -> &mut InertialParameters {
        &mut self.inertial
    }

    /// Swaps in a new inertial group and returns the previous one.
    pub fn replace_inertial(&mut self, inertial: InertialParameters) -> InertialParameters {
        std::mem::replace(&mut self.inertial, inertial)
    }

    pub fn into_inertial(self) -> InertialParameters {
        self.inertial
    }
}

impl From<InertialParameters> for AlgorithmParameters {
    fn from(inertial: InertialParameters) -> Self {
        Self::new(inertial)
    }
}
