pub mod abstract_trait;
pub mod cache;
pub mod config;
pub mod domain;
pub mod model;
pub mod repository;
pub mod schema;
pub mod service;
pub mod state;
pub mod utils;
