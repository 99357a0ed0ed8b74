pub mod analyzers;
pub mod config;
pub mod loader;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod stats;
