pub mod password_hasher;
pub mod user_repository;
