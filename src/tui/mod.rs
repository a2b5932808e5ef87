pub mod app;
pub mod input;
pub mod projector;
pub mod render;
pub mod table;
pub mod theme;

pub use app::run;
