use anyhow::Result;
use std::path::PathBuf;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").unwrap_or("localhost".into()),
            port: std::env::var("DATABASE_PORT")
                .unwrap_or("5432".into())
                .parse()?,
            username: std::env::var("DATABASE_USERNAME").unwrap_or("app".into()),
            password: std::env::var("DATABASE_PASSWORD").unwrap_or("passwd".into()),
            database: std::env::var("DATABASE_NAME").unwrap_or("app".into()),
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST").unwrap_or("localhost".into()),
            port: std::env::var("REDIS_PORT").unwrap_or("6379".into()).parse()?,
        };
        let storage = StorageConfig {
            image_root: std::env::var("VENUE_IMAGE_ROOT")
                .unwrap_or(".data/images".into())
                .into(),
        };
        Ok(Self {
            database,
            redis,
            storage,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct StorageConfig {
    pub image_root: PathBuf,
}
