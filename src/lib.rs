pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod response;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
