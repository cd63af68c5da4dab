mod clean;
mod core;
pub mod finalize;
pub mod metadata;
pub mod plan;
pub mod queue;
pub mod sources;

pub use clean::clean;
pub use core::build_project;
