use crate::{
    extractor::AuthorizedUser,
    model::venue::{CreateVenueRequest, CreateVenueRequestWithOwner, VenueResponse, VenuesResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::lifecycle::{resolve_relation, Relation};
use kernel::model::id::VenueId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_venue(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateVenueRequest>,
) -> AppResult<(StatusCode, Json<VenueResponse>)> {
    req.validate(&())?;

    let venue_id = registry
        .venue_repository()
        .create(
            CreateVenueRequestWithOwner {
                owner_id: user.id(),
                request: req,
            }
            .into(),
        )
        .await?;

    let venue = registry
        .venue_repository()
        .find_by_id(venue_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("venue was not found after insert".into()))?;

    Ok((StatusCode::CREATED, Json(venue.into())))
}

pub async fn show_venue_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<VenuesResponse>> {
    registry
        .venue_repository()
        .find_all()
        .await
        .map(VenuesResponse::from)
        .map(Json)
}

pub async fn show_venue(
    _user: AuthorizedUser,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<VenueResponse>> {
    registry
        .venue_repository()
        .find_by_id(venue_id)
        .await
        .and_then(|venue| match venue {
            Some(venue) => Ok(Json(venue.into())),
            None => Err(AppError::EntityNotFound(format!(
                "venue ({venue_id}) was not found"
            ))),
        })
}

/// Removes a venue and everything hanging off it. The database rows go in
/// one transaction; the stored image is cleaned up only after that commit
/// and only best-effort.
pub async fn delete_venue(
    user: AuthorizedUser,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let venue = registry
        .venue_repository()
        .find_by_id(venue_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("venue ({venue_id}) was not found")))?;

    let relation = resolve_relation(&user.user, venue.owner_id, None);
    if !matches!(relation, Relation::Owner | Relation::Admin) {
        return Err(AppError::ForbiddenOperation(
            "only the venue owner or an administrator may delete a venue".into(),
        ));
    }

    let image_ref = registry.venue_repository().delete_cascade(venue_id).await?;

    if let Some(image_ref) = image_ref {
        if let Err(e) = registry.image_storage().remove(&image_ref).await {
            tracing::warn!(
                error.cause_chain = ?e,
                venue_id = %venue_id,
                image_ref = %image_ref,
                "failed to remove venue image after delete"
            );
        }
    }

    Ok(StatusCode::OK)
}
