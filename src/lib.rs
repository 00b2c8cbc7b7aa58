pub mod audio;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod script;
