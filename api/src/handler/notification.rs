use crate::{extractor::AuthorizedUser, model::notification::NotificationsResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::{id::NotificationId, notification::event::MarkNotificationRead};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_my_notifications(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<NotificationsResponse>> {
    registry
        .notification_repository()
        .find_by_recipient_id(user.id())
        .await
        .map(NotificationsResponse::from)
        .map(Json)
}

pub async fn mark_notification_read(
    user: AuthorizedUser,
    Path(notification_id): Path<NotificationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .notification_repository()
        .mark_read(MarkNotificationRead::new(notification_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}
