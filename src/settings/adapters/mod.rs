//! Adapter implementations of the settings repository port.

pub mod memory;
pub mod postgres;
