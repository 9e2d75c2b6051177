//! Core types and definitions for the TOWER air-traffic simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, directives, session commands, snapshots, events,
//! constants, and configuration. It holds no simulation logic.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
