pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fixer;
pub mod network;
pub mod token;
