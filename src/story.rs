//! Story records
//!
//! [`RawStory`] is a story as the listing endpoint returns it, [`Story`] is
//! the normalized record handed to the site build.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// One page of the stories listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoriesPage {
    /// Stories on this page, in backend order
    pub stories: Vec<RawStory>,
}

/// Translated path of a story in another language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedSlug {
    /// Language code
    pub lang: String,
    /// Translated display name
    pub name: Option<String>,
    /// Translated path
    pub path: String,
}

/// A story as received from the CDN API
///
/// Only the fields the loader maps are declared; anything else in the
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStory {
    pub uuid: String,
    pub full_slug: String,
    pub content: JsonValue,
    pub name: String,
    pub created_at: String,
    /// Null for stories that were never published (draft version)
    pub published_at: Option<String>,
    #[serde(rename = "_editable", default)]
    pub editable: Option<String>,
    #[serde(default)]
    pub is_folder: Option<bool>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub translated_slugs: Option<Vec<TranslatedSlug>>,
}

/// Normalized content record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Story {
    pub id: String,
    pub slug: String,
    pub content: JsonValue,
    pub name: String,
    pub created_at: String,
    pub published_at: Option<String>,
    #[serde(rename = "_editable", skip_serializing_if = "Option::is_none")]
    pub editable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_folder: Option<bool>,
    /// Same value as `slug`
    pub full_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_slugs: Option<Vec<TranslatedSlug>>,
}

impl From<RawStory> for Story {
    fn from(raw: RawStory) -> Self {
        Self {
            id: raw.uuid,
            slug: raw.full_slug.clone(),
            content: raw.content,
            name: raw.name,
            created_at: raw.created_at,
            published_at: raw.published_at,
            editable: raw.editable,
            is_folder: raw.is_folder,
            full_slug: raw.full_slug,
            language: raw.lang,
            translated_slugs: raw.translated_slugs,
        }
    }
}
