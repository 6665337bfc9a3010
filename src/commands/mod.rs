pub mod status;
pub mod web;
