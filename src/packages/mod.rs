// src/packages/mod.rs

//! Concrete package descriptors shipped with the crate
//!
//! Each submodule declares one package: its versions, variants,
//! dependencies, and configure mapping, plus the
//! [`AutotoolsPackage`](crate::autotools::AutotoolsPackage) hooks the
//! orchestrator drives.

pub mod netcdf_cxx4;

pub use netcdf_cxx4::NetcdfCxx4;
