// ins_core/src/inertial.rs

use crate::error::{ParamsError, Result};
use crate::serde_helpers;
use nalgebra::{Matrix3, Vector3, Vector6};
use serde::{Deserialize, Serialize};

/// Below this |det| the misalignment matrix is treated as singular.
pub const MISALIGNMENT_DET_EPSILON: f64 = 1e-9;

// =========================================================================
// == Per-Sensor Calibration ==
// =========================================================================

/// Calibration constants for one sensor triad (gyroscope or accelerometer).
///
/// A raw sample is interpreted as `misalignment * ((raw - bias) ⊙ scale_factor)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SensorCalibration {
    /// Additive offset removed from raw samples, per axis.
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub bias: Vector3<f64>,
    /// Per-axis sensitivity multiplier. Must be strictly positive.
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub scale_factor: Vector3<f64>,
    /// Axis misalignment / cross-coupling matrix. Must be invertible.
    #[serde(with = "serde_helpers::mat3_from_rows")]
    pub misalignment: Matrix3<f64>,
    /// White-noise spectral density, per axis.
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub noise_density: Vector3<f64>,
    /// Bias random-walk spectral density, per axis.
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub bias_instability: Vector3<f64>,
}

impl SensorCalibration {
    /// An ideal sensor: zero bias, unit scale, no misalignment, no noise.
    pub fn nominal() -> Self {
        Self {
            bias: Vector3::zeros(),
            scale_factor: Vector3::repeat(1.0),
            misalignment: Matrix3::identity(),
            noise_density: Vector3::zeros(),
            bias_instability: Vector3::zeros(),
        }
    }

    /// Applies the calibration model to a raw sample.
    pub fn correct(&self, raw: &Vector3<f64>) -> Vector3<f64> {
        self.misalignment * (raw - self.bias).component_mul(&self.scale_factor)
    }

    /// Checks this triad's invariants. `path` prefixes the reported field name.
    pub fn validate(&self, path: &str) -> Result<()> {
        let field = |name: &str| format!("{path}.{name}");

        ensure_finite(&self.bias, &field("bias"))?;
        ensure_finite(&self.scale_factor, &field("scale_factor"))?;
        if let Some(axis) = self.scale_factor.iter().position(|s| *s <= 0.0) {
            return Err(ParamsError::invalid(
                field("scale_factor"),
                format!(
                    "axis {axis} is {}, scale factors must be positive",
                    self.scale_factor[axis]
                ),
            ));
        }

        if !self.misalignment.iter().all(|v| v.is_finite()) {
            return Err(ParamsError::invalid(
                field("misalignment"),
                "contains a non-finite entry",
            ));
        }
        let det = self.misalignment.determinant();
        if det.abs() < MISALIGNMENT_DET_EPSILON {
            return Err(ParamsError::invalid(
                field("misalignment"),
                format!("matrix is singular (det = {det:e})"),
            ));
        }

        ensure_non_negative(&self.noise_density, &field("noise_density"))?;
        ensure_non_negative(&self.bias_instability, &field("bias_instability"))?;
        Ok(())
    }
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self::nominal()
    }
}

// =========================================================================
// == IMU Parameters ==
// =========================================================================

/// Physical and calibration constants of an IMU.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InertialParameters {
    /// Angular-rate sensor triad (rad/s).
    pub gyro: SensorCalibration,
    /// Specific-force sensor triad (m/s^2).
    pub accel: SensorCalibration,
    /// IMU position relative to the body origin, in the body frame (m).
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub lever_arm: Vector3<f64>,
}

impl InertialParameters {
    pub fn new(
        gyro: SensorCalibration,
        accel: SensorCalibration,
        lever_arm: Vector3<f64>,
    ) -> Self {
        Self {
            gyro,
            accel,
            lever_arm,
        }
    }

    /// Corrects a raw 6-DOF sample laid out as `[ax, ay, az, wx, wy, wz]`.
    pub fn correct_sample(&self, raw: &Vector6<f64>) -> Vector6<f64> {
        let accel = self.accel.correct(&raw.fixed_rows::<3>(0).into_owned());
        let gyro = self.gyro.correct(&raw.fixed_rows::<3>(3).into_owned());

        let mut out = Vector6::zeros();
        out.fixed_rows_mut::<3>(0).copy_from(&accel);
        out.fixed_rows_mut::<3>(3).copy_from(&gyro);
        out
    }

    /// The validation step run by whoever produces these parameters.
    /// Reports the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        self.gyro.validate("inertial.gyro")?;
        self.accel.validate("inertial.accel")?;
        ensure_finite(&self.lever_arm, "inertial.lever_arm")
    }
}

// --- Validation Helpers ---

fn ensure_finite(v: &Vector3<f64>, field: &str) -> Result<()> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(axis) => Err(ParamsError::invalid(
            field,
            format!("axis {axis} is not finite ({})", v[axis]),
        )),
        None => Ok(()),
    }
}

fn ensure_non_negative(v: &Vector3<f64>, field: &str) -> Result<()> {
    ensure_finite(v, field)?;
    match v.iter().position(|x| *x < 0.0) {
        Some(axis) => Err(ParamsError::invalid(
            field,
            format!("axis {axis} is negative ({})", v[axis]),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-12;

    fn assert_vector3_approx_eq(v1: &Vector3<f64>, v2: &Vector3<f64>) {
        assert_abs_diff_eq!(v1.x, v2.x, epsilon = EPSILON);
        assert_abs_diff_eq!(v1.y, v2.y, epsilon = EPSILON);
        assert_abs_diff_eq!(v1.z, v2.z, epsilon = EPSILON);
    }

    fn field_of(result: Result<()>) -> String {
        result
            .expect_err("validation should have failed")
            .field()
            .expect("validation errors carry a field")
            .to_string()
    }

    #[test]
    fn test_nominal_is_default_and_valid() {
        let nominal = SensorCalibration::nominal();
        assert_eq!(nominal, SensorCalibration::default());
        assert_eq!(nominal.scale_factor, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(nominal.misalignment, Matrix3::identity());
        assert!(InertialParameters::default().validate().is_ok());
    }

    #[test]
    fn test_nominal_correction_is_identity() {
        let raw = Vector3::new(0.3, -9.81, 1.25);
        assert_vector3_approx_eq(&SensorCalibration::nominal().correct(&raw), &raw);
    }

    #[test]
    fn test_correction_with_bias_and_scale() {
        let cal = SensorCalibration {
            bias: Vector3::new(0.1, -0.2, 0.0),
            scale_factor: Vector3::new(2.0, 0.5, 1.0),
            ..SensorCalibration::nominal()
        };
        let corrected = cal.correct(&Vector3::new(1.1, 0.8, 3.0));
        assert_vector3_approx_eq(&corrected, &Vector3::new(2.0, 0.5, 3.0));
    }

    #[test]
    fn test_correction_applies_misalignment_last() {
        // Swap x and y.
        let cal = SensorCalibration {
            bias: Vector3::new(1.0, 0.0, 0.0),
            misalignment: Matrix3::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0),
            ..SensorCalibration::nominal()
        };
        let corrected = cal.correct(&Vector3::new(3.0, 5.0, 7.0));
        assert_vector3_approx_eq(&corrected, &Vector3::new(5.0, 2.0, 7.0));
    }

    #[test]
    fn test_correct_sample_splits_accel_and_gyro() {
        let params = InertialParameters {
            accel: SensorCalibration {
                bias: Vector3::new(0.0, 0.0, 1.0),
                ..SensorCalibration::nominal()
            },
            gyro: SensorCalibration {
                scale_factor: Vector3::repeat(2.0),
                ..SensorCalibration::nominal()
            },
            lever_arm: Vector3::zeros(),
        };
        let raw = Vector6::new(0.0, 0.0, 10.0, 0.1, 0.2, 0.3);
        let corrected = params.correct_sample(&raw);
        let expected = Vector6::new(0.0, 0.0, 9.0, 0.2, 0.4, 0.6);
        for i in 0..6 {
            assert_abs_diff_eq!(corrected[i], expected[i], epsilon = EPSILON);
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_scale() {
        let mut params = InertialParameters::default();
        params.accel.scale_factor.y = 0.0;
        assert_eq!(field_of(params.validate()), "inertial.accel.scale_factor");
    }

    #[test]
    fn test_validate_rejects_non_finite_bias() {
        let mut params = InertialParameters::default();
        params.gyro.bias.z = f64::NAN;
        assert_eq!(field_of(params.validate()), "inertial.gyro.bias");
    }

    #[test]
    fn test_validate_rejects_singular_misalignment() {
        let mut params = InertialParameters::default();
        params.gyro.misalignment = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0);
        assert_eq!(field_of(params.validate()), "inertial.gyro.misalignment");
    }

    #[test]
    fn test_validate_rejects_negative_noise() {
        let mut params = InertialParameters::default();
        params.accel.bias_instability.x = -1e-6;
        assert_eq!(field_of(params.validate()), "inertial.accel.bias_instability");

        let mut params = InertialParameters::default();
        params.gyro.noise_density.z = -0.1;
        assert_eq!(field_of(params.validate()), "inertial.gyro.noise_density");
    }

    #[test]
    fn test_validate_rejects_infinite_lever_arm() {
        let mut params = InertialParameters::default();
        params.lever_arm.x = f64::INFINITY;
        assert_eq!(field_of(params.validate()), "inertial.lever_arm");
    }

    #[test]
    fn test_validate_reports_gyro_before_accel() {
        let mut params = InertialParameters::default();
        params.accel.scale_factor.x = -1.0;
        params.gyro.scale_factor.x = -1.0;
        assert_eq!(field_of(params.validate()), "inertial.gyro.scale_factor");
    }
}
