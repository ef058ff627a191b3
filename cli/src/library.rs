pub mod api;
pub mod cli;
pub mod config;
pub mod constant;
pub mod error;
pub mod http;
pub mod pruner;
