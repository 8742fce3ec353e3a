//! Infrastructure implementations.
//!
//! Contains port trait implementations and the outward-facing effects:
//! the system clock, environment configuration and file output.

pub mod clock;
pub mod config;
pub mod persistence;
pub mod ports;
