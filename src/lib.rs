pub mod algorithm;
pub mod common;
pub mod config;
pub mod problem;
pub mod stat;
