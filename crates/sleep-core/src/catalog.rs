//! Static catalog: brainwave frequency presets and the built-in playlists.
//!
//! Frequencies are purely descriptive; nothing in the app synthesises them.
//! Playlists point at external YouTube resources.

use serde::{Deserialize, Serialize};

// ── Frequencies ───────────────────────────────────────────────────────────────

/// A brainwave-entrainment preset shown as a card in the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    pub id: &'static str,
    pub name: &'static str,
    /// Nominal value in Hz.
    pub hz: f32,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    /// Accent colour as `#rrggbb`.
    pub color: &'static str,
    pub gradient: [&'static str; 2],
    pub icon: &'static str,
}

impl Frequency {
    /// `7.83 Hz`, `4 Hz`, `528 Hz`.
    pub fn hz_label(&self) -> String {
        format!("{} Hz", self.hz)
    }
}

pub const FREQUENCIES: &[Frequency] = &[
    Frequency {
        id: "schumann",
        name: "Schumann Resonance",
        hz: 7.83,
        description: "Earth's natural frequency",
        benefits: &["Deep meditation", "Grounding", "Stress relief", "Mental clarity"],
        color: "#22c55e",
        gradient: ["#22c55e", "#16a34a"],
        icon: "🌍",
    },
    Frequency {
        id: "deep-theta",
        name: "Deep Theta",
        hz: 4.0,
        description: "Deep relaxation waves",
        benefits: &["REM sleep", "Creativity", "Deep relaxation", "Subconscious access"],
        color: "#8b5cf6",
        gradient: ["#8b5cf6", "#7c3aed"],
        icon: "🌙",
    },
    Frequency {
        id: "theta",
        name: "Theta",
        hz: 6.0,
        description: "Light meditation state",
        benefits: &["Relaxation", "Intuition", "Memory", "Light meditation"],
        color: "#6366f1",
        gradient: ["#6366f1", "#4f46e5"],
        icon: "✨",
    },
    Frequency {
        id: "alpha",
        name: "Alpha",
        hz: 10.0,
        description: "Calm alertness",
        benefits: &["Reduced anxiety", "Calm focus", "Stress reduction", "Relaxation"],
        color: "#06b6d4",
        gradient: ["#06b6d4", "#0891b2"],
        icon: "💫",
    },
    Frequency {
        id: "delta",
        name: "Delta",
        hz: 2.0,
        description: "Deep sleep waves",
        benefits: &["Deep sleep", "Healing", "Regeneration", "Immunity boost"],
        color: "#1e40af",
        gradient: ["#1e40af", "#1e3a8a"],
        icon: "😴",
    },
    Frequency {
        id: "healing",
        name: "Healing",
        hz: 528.0,
        description: "Solfeggio healing frequency",
        benefits: &["DNA repair", "Transformation", "Miracles", "Love frequency"],
        color: "#f59e0b",
        gradient: ["#f59e0b", "#d97706"],
        icon: "💛",
    },
];

pub fn frequency_by_id(id: &str) -> Option<&'static Frequency> {
    FREQUENCIES.iter().find(|f| f.id == id)
}

// ── Playlists ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Binaural,
    Nature,
    Rain,
    Ambient,
    Custom,
}

/// Display metadata for a category tab / card.
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Category {
    /// Tab order in the playlist grid.
    pub const ALL: [Category; 5] = [
        Category::Binaural,
        Category::Nature,
        Category::Rain,
        Category::Ambient,
        Category::Custom,
    ];

    pub fn info(self) -> CategoryInfo {
        match self {
            Self::Binaural => CategoryInfo {
                name: "Binaural Beats",
                icon: "🎧",
                color: "#8b5cf6",
            },
            Self::Nature => CategoryInfo {
                name: "Nature Sounds",
                icon: "🌿",
                color: "#22c55e",
            },
            Self::Rain => CategoryInfo {
                name: "Rain Sounds",
                icon: "🌧️",
                color: "#3b82f6",
            },
            Self::Ambient => CategoryInfo {
                name: "Ambient Music",
                icon: "🎵",
                color: "#06b6d4",
            },
            Self::Custom => CategoryInfo {
                name: "My Playlists",
                icon: "⭐",
                color: "#f59e0b",
            },
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Binaural => "binaural",
            Self::Nature => "nature",
            Self::Rain => "rain",
            Self::Ambient => "ambient",
            Self::Custom => "custom",
        }
    }
}

/// A named reference to a YouTube video or playlist.
///
/// The serialized field names match what earlier releases wrote to storage,
/// so existing custom lists keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub youtube_url: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub is_default: bool,
}

impl Playlist {
    pub fn is_removable(&self) -> bool {
        !self.is_default
    }
}

struct DefaultEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    url: &'static str,
    category: Category,
}

const DEFAULT_ENTRIES: &[DefaultEntry] = &[
    DefaultEntry {
        id: "binaural-1",
        title: "7.83Hz Schumann Resonance",
        description: "Earth's frequency for deep meditation",
        url: "https://www.youtube.com/watch?v=1ZYbU82GVz4",
        category: Category::Binaural,
    },
    DefaultEntry {
        id: "binaural-2",
        title: "Deep Theta 4Hz Sleep",
        description: "Pure theta waves for deep sleep",
        url: "https://www.youtube.com/watch?v=aKT9WBZa_y4",
        category: Category::Binaural,
    },
    DefaultEntry {
        id: "binaural-3",
        title: "Delta Waves Deep Sleep",
        description: "2Hz delta waves for healing sleep",
        url: "https://www.youtube.com/watch?v=8VnL6XnDudc",
        category: Category::Binaural,
    },
    DefaultEntry {
        id: "nature-1",
        title: "Forest Ambience",
        description: "Birds chirping, gentle breeze",
        url: "https://www.youtube.com/watch?v=eKFTSSKCzWA",
        category: Category::Nature,
    },
    DefaultEntry {
        id: "nature-2",
        title: "Ocean Waves",
        description: "Relaxing beach waves",
        url: "https://www.youtube.com/watch?v=bn9F19Hi1Lk",
        category: Category::Nature,
    },
    DefaultEntry {
        id: "rain-1",
        title: "Gentle Rain",
        description: "Soft rain for sleep",
        url: "https://www.youtube.com/watch?v=mPZkdNFkNps",
        category: Category::Rain,
    },
    DefaultEntry {
        id: "rain-2",
        title: "Thunderstorm",
        description: "Rain with distant thunder",
        url: "https://www.youtube.com/watch?v=nDq6TstdEi8",
        category: Category::Rain,
    },
    DefaultEntry {
        id: "ambient-1",
        title: "Weightless - Marconi Union",
        description: "Most relaxing song ever made",
        url: "https://www.youtube.com/watch?v=UfcAVejslrU",
        category: Category::Ambient,
    },
    DefaultEntry {
        id: "ambient-2",
        title: "Deep Space Ambient",
        description: "Cosmic sounds for relaxation",
        url: "https://www.youtube.com/watch?v=HLsnPtRbkYY",
        category: Category::Ambient,
    },
];

/// The built-in playlists, in display order.
pub fn default_playlists() -> Vec<Playlist> {
    DEFAULT_ENTRIES
        .iter()
        .map(|e| Playlist {
            id: e.id.to_string(),
            title: e.title.to_string(),
            description: e.description.to_string(),
            youtube_url: e.url.to_string(),
            category: e.category,
            thumbnail: None,
            is_default: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn frequency_ids_are_unique_and_first_is_schumann() {
        let ids: HashSet<_> = FREQUENCIES.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), FREQUENCIES.len());
        assert_eq!(FREQUENCIES[0].id, "schumann");
        assert_eq!(FREQUENCIES[0].hz_label(), "7.83 Hz");
        assert_eq!(frequency_by_id("healing").map(|f| f.hz), Some(528.0));
        assert!(frequency_by_id("gamma").is_none());
    }

    #[test]
    fn defaults_are_flagged_and_never_custom() {
        let defaults = default_playlists();
        assert_eq!(defaults.len(), 9);
        let ids: HashSet<_> = defaults.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), defaults.len());
        for p in &defaults {
            assert!(p.is_default);
            assert!(!p.is_removable());
            assert_ne!(p.category, Category::Custom);
        }
    }

    #[test]
    fn playlist_serializes_with_storage_field_names() {
        let p = default_playlists().remove(0);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["youtubeUrl"], "https://www.youtube.com/watch?v=1ZYbU82GVz4");
        assert_eq!(json["isDefault"], true);
        assert_eq!(json["category"], "binaural");
        assert!(json.get("thumbnail").is_none());
    }

    #[test]
    fn playlist_reads_records_written_without_thumbnail() {
        let raw = r#"{"id":"custom-1","title":"Mine","description":"Custom playlist",
            "youtubeUrl":"https://youtu.be/abc","category":"custom","isDefault":false}"#;
        let p: Playlist = serde_json::from_str(raw).unwrap();
        assert_eq!(p.category, Category::Custom);
        assert!(p.thumbnail.is_none());
        assert!(p.is_removable());
    }
}
