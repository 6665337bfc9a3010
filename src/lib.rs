pub mod cli;
pub mod commands;
pub mod compose;
pub mod web;
