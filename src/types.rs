//! Common types used throughout the loader
//!
//! Enumerations shared by the configuration and the query builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Content Version
// ============================================================================

/// Which version of the content to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// Published content only
    #[default]
    Published,
    /// Latest draft, requires a preview token
    Draft,
}

impl Version {
    /// Value sent as the `version` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Region
// ============================================================================

/// Storyblok server region of the space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// United States
    #[default]
    Us,
    /// Europe
    Eu,
}

impl Region {
    /// Base URL of the CDN API for this region
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Us => "https://api-us.storyblok.com/v2",
            Self::Eu => "https://api.storyblok.com/v2",
        }
    }
}

// ============================================================================
// Link Resolution
// ============================================================================

/// How links to other stories are returned by the listing endpoint
///
/// Accepts the strings `url`, `story`, `0`, `1`, `2` as well as the bare
/// numbers 0-2 when read from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "String")]
pub enum ResolveLinks {
    /// Links resolved to their URL
    Url,
    /// Links resolved to the full story object
    Story,
    /// Raw reference code `0`
    Level0,
    /// Raw reference code `1`
    Level1,
    /// Raw reference code `2`
    Level2,
}

impl ResolveLinks {
    /// Value sent as the `resolve_links` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Story => "story",
            Self::Level0 => "0",
            Self::Level1 => "1",
            Self::Level2 => "2",
        }
    }
}

impl fmt::Display for ResolveLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolveLinks {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(Self::Url),
            "story" => Ok(Self::Story),
            "0" => Ok(Self::Level0),
            "1" => Ok(Self::Level1),
            "2" => Ok(Self::Level2),
            other => Err(format!(
                "unknown resolve_links mode '{other}' (expected url, story, 0, 1 or 2)"
            )),
        }
    }
}

impl TryFrom<serde_json::Value> for ResolveLinks {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Number(n) => n.to_string().parse(),
            other => Err(format!("resolve_links must be a string, got {other}")),
        }
    }
}

impl From<ResolveLinks> for String {
    fn from(mode: ResolveLinks) -> Self {
        mode.as_str().to_string()
    }
}
