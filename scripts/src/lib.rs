//! Scripts for deploying the game contracts and interacting with them.

#![deny(missing_docs)]

pub mod batch_mint;
pub mod calls;
pub mod chain;
pub mod cli;
mod commands;
pub mod config;
pub mod configurator;
pub mod constants;
pub mod errors;
pub mod forms;
pub mod metadata;
pub mod ownership;
pub mod registry;
pub mod sequencer;
pub mod types;
pub mod utils;
pub mod views;

#[cfg(test)]
mod test_utils;
