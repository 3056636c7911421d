pub mod catalog;
pub mod config;
pub mod platform;
pub mod session;
pub mod store;
pub mod youtube;
