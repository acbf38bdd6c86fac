//! Resolve a free-text instruction to one file/data operation and run it
//! against a data root.

pub mod banner;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod handler;
pub mod llm;
pub mod ops;
pub mod resolver;
pub mod store;
pub mod tools;
