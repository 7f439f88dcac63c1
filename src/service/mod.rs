pub mod content_service;
pub mod otp_service;
pub mod session_service;
pub mod sms_service;
pub mod user_service;
