// Library exports for the server binary and integration tests

pub mod api;
pub mod app_data;
pub mod cache;
pub mod cli;
pub mod config;
pub mod coordinators;
pub mod errors;
pub mod providers;
pub mod stores;
pub mod types;

#[cfg(test)]
pub mod test;

pub use app_data::AppData;
