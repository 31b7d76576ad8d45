pub mod app;
pub mod config;
pub mod constants;
pub mod message;
pub mod speech;
pub mod text_wrapping;
pub mod transcript;
