//! Gallery Image Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Gallery image entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub image_url: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImageCreate {
    pub image_url: String,
}
