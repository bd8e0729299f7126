pub mod database;
pub mod redis;
pub mod repository;
pub mod storage;
