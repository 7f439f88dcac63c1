pub mod blog_post;
pub mod otp_code;
pub mod resource;
pub mod session;
pub mod user;
