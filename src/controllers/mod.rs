pub mod content_controller;
pub mod user_controller;
