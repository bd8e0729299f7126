use crate::model::id::UserId;
use derive_new::new;

#[derive(new)]
pub struct CreateVenue {
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
    pub image_ref: Option<String>,
}
