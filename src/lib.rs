pub mod application;
pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod core;
pub mod modules;
pub mod utils;
