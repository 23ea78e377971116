// Library for tests to access modules

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod models;
pub mod rng;
pub mod routes;
pub mod version;
pub mod worker;
