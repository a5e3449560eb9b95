//! Core configuration and constants

pub mod config;
pub mod constants;
