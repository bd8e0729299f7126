use async_trait::async_trait;
use shared::error::AppResult;

/// Venue image files live outside the transactional store. Removal is
/// invoked only after the owning transaction commits and is best-effort:
/// callers log a failure and move on.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn remove(&self, image_ref: &str) -> AppResult<()>;
}
