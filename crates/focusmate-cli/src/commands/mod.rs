pub mod agenda;
pub mod bucket;
pub mod config;
pub mod focus;
pub mod project;
pub mod task;
