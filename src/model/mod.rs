pub mod annotation;
pub mod config;
pub mod entry;

pub use annotation::*;
pub use config::*;
pub use entry::*;
