//! class-planner CLI

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod picker;
pub mod render;
pub mod store;
