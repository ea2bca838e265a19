//! Process-local adapters, used by tests and for running the HTTP surface
//! without a database.

pub mod user_repository;
