// ins_core/src/shared.rs

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::inertial::InertialParameters;
use crate::params::AlgorithmParameters;

/// An immutable, versioned view of the parameters. Holding one keeps that
/// exact version alive even after a newer one has been published.
#[derive(Debug, Clone)]
pub struct ParameterSnapshot {
    params: Arc<AlgorithmParameters>,
    version: u64,
}

impl ParameterSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn params(&self) -> &AlgorithmParameters {
        &self.params
    }
}

impl Deref for ParameterSnapshot {
    type Target = AlgorithmParameters;

    fn deref(&self) -> &Self::Target {
        &self.params
    }
}

/// Parameters shared between concurrently running consumers (e.g. redundant
/// estimators) that must survive runtime re-calibration.
///
/// Writers publish whole new snapshots; nothing is ever mutated in place. A
/// reader sees either the complete old snapshot or the complete new one.
/// The lock is only held long enough to clone or swap an `Arc`.
#[derive(Debug)]
pub struct SharedParameters {
    current: RwLock<ParameterSnapshot>,
}

impl SharedParameters {
    /// Publishes `params` as version 0. Like `AlgorithmParameters::new`, this
    /// does not validate.
    pub fn new(params: AlgorithmParameters) -> Self {
        Self {
            current: RwLock::new(ParameterSnapshot {
                params: Arc::new(params),
                version: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Validates `inertial` and, if it passes, publishes it as a new snapshot.
    /// Returns the new version. A rejected calibration leaves the current
    /// snapshot in place.
    pub fn recalibrate(&self, inertial: InertialParameters) -> Result<u64> {
        self.replace(AlgorithmParameters::new(inertial))
    }

    /// Validates and publishes a whole new aggregate. Returns the new version.
    pub fn replace(&self, params: AlgorithmParameters) -> Result<u64> {
        if let Err(e) = params.inertial().validate() {
            warn!("Rejected INS re-calibration: {}", e);
            return Err(e);
        }

        let next = Arc::new(params);
        let mut current = self.current.write();
        let version = current.version + 1;
        *current = ParameterSnapshot {
            params: next,
            version,
        };
        drop(current);

        info!(version, "Published new INS parameter snapshot.");
        Ok(version)
    }
}

impl From<AlgorithmParameters> for SharedParameters {
    fn from(params: AlgorithmParameters) -> Self {
        Self::new(params)
    }
}
