//! Command implementations for the pantryctl CLI

pub mod config;
pub mod demo;
