pub mod server;

pub use db_infra::config::db;
