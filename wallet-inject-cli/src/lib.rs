//! Simulator for injected wallet detection.
//!
//! Builds a mock host from a JSON fixture, runs the detector against it and
//! renders what was found.

pub mod report;
pub mod simulation;

pub use report::{InstalledWallet, render_json, render_table};
pub use simulation::{
    Simulation, load_catalog, load_config, load_fixture, resolve_config, sign_in,
};
