pub mod api;
pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod meals;
pub mod state;
pub mod view;
