pub mod annotation;
pub mod io;
pub mod network;
pub mod system;
