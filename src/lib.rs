pub mod config;
pub mod dashboard;
pub mod data_fetch;
pub mod env_loader;
pub mod json_writer;
pub mod models;
pub mod pipeline;
pub mod transform;
