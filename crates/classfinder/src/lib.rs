pub mod cli;
pub mod config;
pub mod db;
pub mod enrich;
pub mod error;
pub mod ratings;
pub mod schedule;
pub mod sort;
pub mod types;
