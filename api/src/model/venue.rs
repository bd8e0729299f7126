use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{UserId, VenueId},
    venue::{event::CreateVenue, Venue, VenueStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VenueStatusLabel {
    Open,
    Closed,
}

impl From<VenueStatus> for VenueStatusLabel {
    fn from(value: VenueStatus) -> Self {
        match value {
            VenueStatus::Open => Self::Open,
            VenueStatus::Closed => Self::Closed,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(range(min = 1))]
    pub price_per_hour: i64,
    #[garde(custom(image_ref_is_plain_file_name))]
    pub image_ref: Option<String>,
}

/// The reference names a file issued by the upload flow, never a path:
/// separators or `..` would let deletion-time cleanup reach outside the
/// storage root.
fn image_ref_is_plain_file_name(value: &Option<String>, _ctx: &()) -> garde::Result {
    let Some(value) = value else {
        return Ok(());
    };
    if value.is_empty() || value.contains(['/', '\\']) || value.contains("..") {
        return Err(garde::Error::new(
            "image reference must be a plain file name",
        ));
    }
    Ok(())
}

/// Pairs the request body with the owner taken from the session, never
/// from the payload.
pub struct CreateVenueRequestWithOwner {
    pub owner_id: UserId,
    pub request: CreateVenueRequest,
}

impl From<CreateVenueRequestWithOwner> for CreateVenue {
    fn from(value: CreateVenueRequestWithOwner) -> Self {
        let CreateVenueRequestWithOwner {
            owner_id,
            request:
                CreateVenueRequest {
                    title,
                    price_per_hour,
                    image_ref,
                },
        } = value;
        CreateVenue {
            owner_id,
            title,
            price_per_hour,
            image_ref,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub venue_id: VenueId,
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
    pub status: VenueStatusLabel,
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Venue> for VenueResponse {
    fn from(value: Venue) -> Self {
        let Venue {
            venue_id,
            owner_id,
            title,
            price_per_hour,
            status,
            image_ref,
            created_at,
            updated_at,
        } = value;
        Self {
            venue_id,
            owner_id,
            title,
            price_per_hour,
            status: status.into(),
            image_ref,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuesResponse {
    pub items: Vec<VenueResponse>,
}

impl From<Vec<Venue>> for VenuesResponse {
    fn from(value: Vec<Venue>) -> Self {
        Self {
            items: value.into_iter().map(VenueResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(image_ref: Option<&str>) -> CreateVenueRequest {
        CreateVenueRequest {
            title: "Loft 21".into(),
            price_per_hour: 500,
            image_ref: image_ref.map(Into::into),
        }
    }

    #[test]
    fn image_ref_must_be_a_plain_file_name() {
        for bad in ["../victim.txt", "..", "a/b.png", "/etc/hostname", "..\\up", ""] {
            assert!(
                request(Some(bad)).validate(&()).is_err(),
                "expected {bad:?} to fail validation"
            );
        }
    }

    #[test]
    fn plain_or_absent_image_ref_passes() {
        assert!(request(Some("cover.png")).validate(&()).is_ok());
        assert!(request(None).validate(&()).is_ok());
    }
}
