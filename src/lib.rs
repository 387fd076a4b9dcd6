pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod validate;
pub mod viewer;
