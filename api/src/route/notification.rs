use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::notification::{mark_notification_read, show_my_notifications};

pub fn build_notification_routers() -> Router<AppRegistry> {
    let notifications_routers = Router::new()
        .route("/me", get(show_my_notifications))
        .route("/:notification_id/read", put(mark_notification_read));

    Router::new().nest("/notifications", notifications_routers)
}
