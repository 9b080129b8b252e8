//! Core library components.
//!
//! The resolution pipeline (load, merge, validate, export) and the
//! configuration and remote-store plumbing around it.

pub mod config;
pub mod constants;
pub mod domain;
pub mod dotenv;
pub mod export;
pub mod loader;
pub mod merge;
pub mod remote;
pub mod resolver;
pub mod sync;
pub mod types;
pub mod validate;
