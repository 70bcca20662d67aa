//! CelebA Fetch Library
//!
//! Downloads the CelebA image archive into a project's `data/celeba`
//! directory and unpacks it, skipping either step when its output is
//! already on disk.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::commands::fetch::{ensure_dataset_available, FetchOutcome};
pub use crate::core::config::FetchConfig;
pub use crate::error::{FetchError, Result};
