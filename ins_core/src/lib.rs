// ins_core/src/lib.rs

// This file defines the public modules of the library.
pub mod config;
pub mod error;
pub mod inertial;
pub mod params;
pub mod prelude;
pub mod serde_helpers;
pub mod shared;
