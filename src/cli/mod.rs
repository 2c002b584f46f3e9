//! CLI infrastructure for the ghostbuster engine
//!
//! This module provides the command-line interface for batch simulation of
//! automated seekers and for replaying a scripted game.

pub mod commands;
pub mod config;
pub mod output;
