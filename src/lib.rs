//! Projectile trajectory integration for the ballistic range front-ends.
//!
//! The [`core`] module holds everything reusable: the integrator, the shot
//! history, trajectory sinks and the report formatters. The binaries only
//! gather parameters and present what the integrator returns.

pub mod core;
