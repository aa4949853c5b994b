pub mod loader;
pub mod problem;
pub mod report;
