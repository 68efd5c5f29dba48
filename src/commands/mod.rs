//! Command implementations for the prelaunch CLI

pub mod cache;
pub mod completions;
pub mod extract;
pub mod helpers;
pub mod launch;
pub mod resolve;
pub mod version;
