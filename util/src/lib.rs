pub mod config;
pub mod ws;
