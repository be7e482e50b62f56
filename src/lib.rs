pub mod cli;
pub mod config;
pub mod extract;
pub mod http_client;
pub mod match_fetch;
pub mod matches;
pub mod pipeline;
pub mod standings;
pub mod week_results;
pub mod wiki;
