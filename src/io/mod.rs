pub mod config_io;
pub mod dir_io;
pub mod editor;
pub mod event_log;
pub mod sidecar;
