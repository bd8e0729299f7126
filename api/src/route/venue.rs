use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    reservation::{check_venue_availability, reserve_venue, show_venue_reservations},
    venue::{delete_venue, register_venue, show_venue, show_venue_list},
};

pub fn build_venue_routers() -> Router<AppRegistry> {
    let venues_routers = Router::new()
        .route("/", post(register_venue))
        .route("/", get(show_venue_list))
        .route("/:venue_id", get(show_venue))
        .route("/:venue_id", delete(delete_venue))
        .route("/:venue_id/availability", get(check_venue_availability))
        .route("/:venue_id/reservations", post(reserve_venue))
        .route("/:venue_id/reservations", get(show_venue_reservations));

    Router::new().nest("/venues", venues_routers)
}
