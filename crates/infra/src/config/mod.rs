//! Configuration loading from the process environment.

mod loader;

pub use loader::load_config;
