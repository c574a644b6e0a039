//! Core runtime for the ignition demo application.
//!
//! Provides the named bean registry ([`beans::BeanRegistry`]), the read-only
//! context it freezes into ([`beans::BeanContext`]), the standard `/health`
//! route, and the HTTP middleware layers every app installs.

pub mod beans;
pub mod health;
pub mod layers;

pub use beans::{BeanContext, BeanError, BeanRegistry, BeanState};
pub use layers::init_tracing;
