pub mod export_service;
pub mod user_service;
