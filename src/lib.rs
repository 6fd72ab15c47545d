pub mod app_state;
pub mod config;
pub mod db;
pub mod errors;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

#[doc(hidden)]
pub mod test_utils;
