//! Changelog entry and content kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What kind of change a changelog entry announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Feature,
    Improvement,
    Bugfix,
    Breaking,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        Self::Feature,
        Self::Improvement,
        Self::Bugfix,
        Self::Breaking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Improvement => "improvement",
            Self::Bugfix => "bugfix",
            Self::Breaking => "breaking",
        }
    }
}

/// Media attached to a changelog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Text,
    Image,
    Video,
    Gif,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [Self::Text, Self::Image, Self::Video, Self::Gif];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
        }
    }
}

macro_rules! impl_lowercase_vocabulary {
    ($name:ident, $kind:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|kind| kind.as_str() == s)
                    .ok_or_else(|| CoreError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_lowercase_vocabulary!(EntryKind, "changelog entry type");
impl_lowercase_vocabulary!(ContentKind, "changelog content type");
