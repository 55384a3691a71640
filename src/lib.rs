// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod asset;
pub mod file;
pub mod patch;
pub mod product;
pub mod progress;
pub mod serialize;
pub mod sync;

#[cfg(feature = "cli")]
pub mod cli;
pub mod gui;

pub use error::{Result, SyncError};
pub use product::{ProductInput, ProductRecord};
pub use sync::{CatalogSync, SyncReport};
