//! Ingestion - Loads external tabular sources into in-memory tables

pub mod csv;

pub use csv::{read_csv_path, read_csv_str};
