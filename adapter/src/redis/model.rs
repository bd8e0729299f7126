use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;
use uuid::Uuid;

pub struct AuthorizationKey(String);

impl AuthorizationKey {
    pub(crate) fn inner(&self) -> &str {
        &self.0
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(value: &AccessToken) -> Self {
        Self(format!("auth:token:{}", value.0))
    }
}

pub struct AuthorizedUserId(UserId);

impl From<AuthorizedUserId> for UserId {
    fn from(value: AuthorizedUserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from(Uuid::parse_str(&value)?)))
    }
}
