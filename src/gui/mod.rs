// src/gui/mod.rs
pub mod app;
pub mod form;
pub mod progress;

pub use app::run;
