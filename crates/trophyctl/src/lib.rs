//! Trophyctl library - exposes modules for integration tests

pub mod commands;
pub mod config;
pub mod flags;
pub mod input;
