//! Domain layer: wire models, option bags and ports. No HTTP plumbing here.

pub mod duration;
pub mod models;
pub mod options;
pub mod ports;
