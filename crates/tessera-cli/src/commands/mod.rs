//! CLI command implementations

pub mod centrality;
pub mod completions;
pub mod config;
pub mod neighbors;
pub mod paths;
pub mod project;
pub mod request;
pub mod search;
pub mod view;
