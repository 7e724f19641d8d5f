pub mod cli;
pub mod commands;
pub mod summary;
pub mod tables;
pub mod trio;
pub mod utils;
