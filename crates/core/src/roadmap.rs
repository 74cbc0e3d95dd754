//! Roadmap vocabularies and reaction tallies.
//!
//! Roadmap status and priority each live in two alphabets: the display
//! names callers see (`planned`, `low`, ...) and the storage names the
//! backend persists (`planejado`, `baixa`, ...). Both directions are driven
//! by one table per enum so the mapping stays total and bijective.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_dual_alphabet {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $display:literal <=> $storage:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// `(variant, display name, storage name)` rows, in order.
            pub const TABLE: &'static [($name, &'static str, &'static str)] =
                &[ $( ($name::$variant, $display, $storage) ),+ ];

            /// Name exposed to callers.
            pub fn display_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $display ),+
                }
            }

            /// Name persisted by the backend.
            pub fn storage_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $storage ),+
                }
            }

            pub fn from_display(value: &str) -> Result<Self, CoreError> {
                Self::TABLE
                    .iter()
                    .find(|(_, display, _)| *display == value)
                    .map(|(variant, _, _)| *variant)
                    .ok_or_else(|| CoreError::UnknownValue {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }

            pub fn from_storage(value: &str) -> Result<Self, CoreError> {
                Self::TABLE
                    .iter()
                    .find(|(_, _, storage)| *storage == value)
                    .map(|(variant, _, _)| *variant)
                    .ok_or_else(|| CoreError::UnknownValue {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.display_name())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_display(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.display_name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::from_display(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_dual_alphabet! {
    /// Roadmap item lifecycle status.
    RoadmapStatus ("roadmap status") {
        Planned => "planned" <=> "planejado",
        InProgress => "in-progress" <=> "em-desenvolvimento",
        Completed => "completed" <=> "concluido",
    }
}

define_dual_alphabet! {
    /// Roadmap item priority.
    RoadmapPriority ("roadmap priority") {
        Low => "low" <=> "baixa",
        Medium => "medium" <=> "media",
        High => "high" <=> "alta",
    }
}

/// Map a display status to its storage name.
pub fn status_to_storage(display: &str) -> Result<&'static str, CoreError> {
    RoadmapStatus::from_display(display).map(RoadmapStatus::storage_name)
}

/// Map a storage status to its display name.
pub fn status_to_display(storage: &str) -> Result<&'static str, CoreError> {
    RoadmapStatus::from_storage(storage).map(RoadmapStatus::display_name)
}

// ---------------------------------------------------------------------------
// Reactions
// ---------------------------------------------------------------------------

/// Kind of emoji-style reaction on a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Likes,
    Hearts,
    Ideas,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 3] = [Self::Likes, Self::Hearts, Self::Ideas];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Hearts => "hearts",
            Self::Ideas => "ideas",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "reaction type",
                value: s.to_string(),
            })
    }
}

/// Per-item reaction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTally {
    pub likes: u32,
    pub hearts: u32,
    pub ideas: u32,
}

impl ReactionTally {
    pub fn get(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Likes => self.likes,
            ReactionKind::Hearts => self.hearts,
            ReactionKind::Ideas => self.ideas,
        }
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        let counter = match kind {
            ReactionKind::Likes => &mut self.likes,
            ReactionKind::Hearts => &mut self.hearts,
            ReactionKind::Ideas => &mut self.ideas,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        self.likes + self.hearts + self.ideas
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn status_round_trip_is_stable() {
        for (_, display, _) in RoadmapStatus::TABLE {
            let stored = status_to_storage(display).unwrap();
            let back = status_to_display(stored).unwrap();
            assert_eq!(back, *display);
            assert_eq!(status_to_storage(back).unwrap(), stored);
        }
    }

    #[test]
    fn status_mapping_is_bijective() {
        let displays: HashSet<_> = RoadmapStatus::TABLE.iter().map(|(_, d, _)| *d).collect();
        let storages: HashSet<_> = RoadmapStatus::TABLE.iter().map(|(_, _, s)| *s).collect();
        assert_eq!(displays.len(), 3);
        assert_eq!(storages.len(), 3);
    }

    #[test]
    fn status_mapping_preserves_order() {
        let mut by_variant = RoadmapStatus::TABLE.to_vec();
        by_variant.sort_by_key(|(variant, _, _)| *variant);
        assert_eq!(by_variant, RoadmapStatus::TABLE.to_vec());
        assert!(RoadmapStatus::Planned < RoadmapStatus::InProgress);
        assert!(RoadmapStatus::InProgress < RoadmapStatus::Completed);
    }

    #[test]
    fn in_development_maps_to_in_progress() {
        assert_eq!(status_to_display("em-desenvolvimento").unwrap(), "in-progress");
        assert_eq!(status_to_storage("in-progress").unwrap(), "em-desenvolvimento");
    }

    #[test]
    fn unknown_status_is_rejected_in_both_directions() {
        assert!(status_to_display("archived").is_err());
        assert!(status_to_storage("planejado").is_err());
        assert!(RoadmapStatus::from_storage("planned").is_err());
    }

    #[test]
    fn priority_maps_both_ways() {
        for (variant, display, storage) in RoadmapPriority::TABLE {
            assert_eq!(RoadmapPriority::from_display(display).unwrap(), *variant);
            assert_eq!(RoadmapPriority::from_storage(storage).unwrap(), *variant);
        }
        assert_eq!(RoadmapPriority::Medium.storage_name(), "media");
    }

    #[test]
    fn dual_alphabet_serializes_display_name() {
        let json = serde_json::to_value(RoadmapStatus::InProgress).unwrap();
        assert_eq!(json, "in-progress");
        let parsed: RoadmapPriority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, RoadmapPriority::High);
        assert!(serde_json::from_str::<RoadmapPriority>("\"alta\"").is_err());
    }

    #[test]
    fn reaction_kind_parses_and_serializes() {
        assert_eq!("hearts".parse::<ReactionKind>().unwrap(), ReactionKind::Hearts);
        assert!("thumbs".parse::<ReactionKind>().is_err());
        assert_eq!(serde_json::to_value(ReactionKind::Ideas).unwrap(), "ideas");
    }

    #[test]
    fn tally_increments_only_the_named_kind() {
        let mut tally = ReactionTally::default();
        tally.increment(ReactionKind::Likes);
        tally.increment(ReactionKind::Hearts);
        assert_eq!(tally, ReactionTally { likes: 1, hearts: 1, ideas: 0 });
        assert_eq!(tally.get(ReactionKind::Ideas), 0);
        assert_eq!(tally.total(), 2);
    }
}
