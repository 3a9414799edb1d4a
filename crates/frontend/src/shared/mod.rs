pub mod api_utils;
pub mod components;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod spinner;
