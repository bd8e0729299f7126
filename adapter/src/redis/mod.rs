use redis::AsyncCommands;
use shared::{config::RedisConfig, error::AppResult};

pub mod model;

use self::model::{AuthorizationKey, AuthorizedUserId};

/// Session store. The identity provider plants `token -> user id` entries
/// here; this client only ever reads them.
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = redis::Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }

    pub async fn get(&self, key: &AuthorizationKey) -> AppResult<Option<AuthorizedUserId>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key.inner()).await?;
        value.map(AuthorizedUserId::try_from).transpose()
    }
}
