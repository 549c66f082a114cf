//! Global application preferences.
//!
//! A single settings row holds the dark-mode flag. It is created with
//! defaults the first time it is read and then updated in place:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
