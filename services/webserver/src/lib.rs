pub mod config;
pub mod features;
pub mod service;

pub use service::Webserver;
