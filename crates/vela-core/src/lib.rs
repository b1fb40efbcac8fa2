//! VELA Core - Fundamental types for the VELA control protocol
//!
//! This crate defines the types shared by every other crate in the
//! workspace:
//! - The error taxonomy (`VelaError`, `VelaResult`)
//! - The 64-bit fixed-point time tag carried by bundles

pub mod error;
pub mod time;

pub use error::*;
pub use time::*;
