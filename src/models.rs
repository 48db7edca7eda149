use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: ReviewUser,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Seconds since the Unix epoch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_id: i64,
}

// Requests

/// Body of `get_tag_info` and `get_reviews_on_file`. An unparsable route id
/// goes out as `{"id": null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByIdRequest {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertReviewRequest {
    pub content: String,
    pub file_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTagRequest {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl From<&Tag> for UpdateTagRequest {
    fn from(tag: &Tag) -> Self {
        UpdateTagRequest {
            id: tag.id,
            name: tag.name.clone(),
            description: tag.description.clone(),
        }
    }
}

// Responses

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagInfoResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: Tag,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
}
