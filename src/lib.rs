// Prophet - game flow monitor and teammate scoring for the League client

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod lcu;
pub mod lcu_watcher;
pub mod scoring;
pub mod team_report;
pub mod utils;

#[cfg(test)]
mod test_helpers;

pub use app::{HorseQuery, Prophet};
pub use error::{ProphetError, QueryError};
