pub mod annotator;
pub mod utils;
pub mod web;
