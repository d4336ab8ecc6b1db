pub mod exporter;
pub mod generation_service;
pub mod history_service;
pub mod normalizer;
pub mod provider;
pub mod renderer;
