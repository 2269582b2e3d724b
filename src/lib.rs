pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod generation;
pub mod ingest;
pub mod llm;
pub mod models;
