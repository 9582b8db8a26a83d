pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;

#[cfg(feature = "server")]
pub mod database;
#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "graphql")]
pub mod graphql;
