//! Per-operation algorithms.
//!
//! Everything here is a function of its input (file contents, a directory
//! listing, or a collaborator's reply) and returns the bytes to write. The
//! engine owns preconditions and output writing.

pub mod contacts;
pub mod dates;
pub mod docs;
pub mod logs;
pub mod remote;
pub mod tickets;
