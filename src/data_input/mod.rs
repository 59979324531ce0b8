// src/data_input/mod.rs

pub mod csv_parser;
pub mod manifest;
pub mod series;

// src/data_input/mod.rs
