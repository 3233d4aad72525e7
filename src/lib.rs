#![doc = "The `taskpad` library crate."]
#![doc = ""]
#![doc = "Account registration, stateless session tokens and per-user task CRUD over"]
#![doc = "actix-web and Postgres. The binary (`main.rs`) reads the configuration, connects"]
#![doc = "the store and serves the routes assembled by [`app::AppServices`]."]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;

pub use crate::app::AppServices;
pub use crate::error::AppError;
