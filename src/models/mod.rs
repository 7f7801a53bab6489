pub mod exercise;
pub mod user;
pub mod workout;
