pub mod aggregate;
pub mod cache;
pub mod candidates;
pub mod commands;
pub mod config;
pub mod controller;
pub mod data_provider;
pub mod drag;
pub mod error;
pub mod file_store;
pub mod fixtures;
pub mod formatting;
pub mod grade;
pub mod registry;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod testing;
