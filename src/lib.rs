pub mod config;
pub mod controllers;
pub mod error;
pub mod extractors;
pub mod models;
pub mod service;
