pub mod annotator;
pub mod class_registry;
pub mod file_manager;
pub mod utils;
