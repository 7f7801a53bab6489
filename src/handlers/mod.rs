pub mod config;
pub mod exercise;
pub mod report;
pub mod user;
pub mod workout;
