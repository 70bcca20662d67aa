pub mod config;
pub mod download;
pub mod drive;
pub mod extract;
pub mod paths;
