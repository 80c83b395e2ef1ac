use serde::{Deserialize, Deserializer, Serialize};

/// A recommended song as returned by the recommendations endpoint.
///
/// The backend is the source of truth; nothing here is mutated or persisted
/// locally. A song missing its name or artist is kept in the list but is
/// never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
}

impl Song {
    /// True when both name and artist are present and non-blank.
    pub fn is_renderable(&self) -> bool {
        !self.name.trim().is_empty() && !self.artist.trim().is_empty()
    }
}

/// Accept both `"id": "4uLU6hMC..."` and `"id": 1` — the service has been
/// seen returning either.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}

/// Recommendation strategy forwarded verbatim to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecKind {
    /// Collaborative filtering.
    Cf,
    /// Genre-based (content-based) filtering.
    Cbf,
    #[default]
    Hybrid,
}

impl RecKind {
    pub const ALL: [RecKind; 3] = [RecKind::Cf, RecKind::Cbf, RecKind::Hybrid];

    /// The wire value sent as the `type` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Cf => "cf",
            Self::Cbf => "cbf",
            Self::Hybrid => "hybrid",
        }
    }

    /// Human-readable label for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cf => "collaborative filtering",
            Self::Cbf => "genre-based",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Cf => Self::Cbf,
            Self::Cbf => Self::Hybrid,
            Self::Hybrid => Self::Cf,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Cf => Self::Hybrid,
            Self::Cbf => Self::Cf,
            Self::Hybrid => Self::Cbf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_with_name_and_artist_is_renderable() {
        let song = Song {
            id: "1".to_string(),
            name: "Song A".to_string(),
            artist: "Artist X".to_string(),
        };
        assert!(song.is_renderable());
    }

    #[test]
    fn song_missing_name_or_artist_is_not_renderable() {
        let no_name = Song {
            id: "1".to_string(),
            name: String::new(),
            artist: "Artist X".to_string(),
        };
        let no_artist = Song {
            id: "2".to_string(),
            name: "Song A".to_string(),
            artist: "   ".to_string(),
        };
        assert!(!no_name.is_renderable());
        assert!(!no_artist.is_renderable());
    }

    #[test]
    fn song_deserializes_with_string_or_numeric_id() {
        let text: Song =
            serde_json::from_str(r#"{"id":"4uLU6hMC","name":"Song A","artist":"Artist X"}"#)
                .unwrap();
        assert_eq!(text.id, "4uLU6hMC");

        let numeric: Song =
            serde_json::from_str(r#"{"id":1,"name":"Song A","artist":"Artist X"}"#).unwrap();
        assert_eq!(numeric.id, "1");
    }

    #[test]
    fn song_tolerates_missing_fields() {
        let partial: Song = serde_json::from_str(r#"{"id":"1","name":"Song A"}"#).unwrap();
        assert_eq!(partial.artist, "");
        assert!(!partial.is_renderable());
    }

    #[test]
    fn rec_kind_wire_values() {
        assert_eq!(RecKind::Cf.as_param(), "cf");
        assert_eq!(RecKind::Cbf.as_param(), "cbf");
        assert_eq!(RecKind::Hybrid.as_param(), "hybrid");
    }

    #[test]
    fn rec_kind_defaults_to_hybrid() {
        assert_eq!(RecKind::default(), RecKind::Hybrid);
    }

    #[test]
    fn rec_kind_cycles_through_all() {
        let mut kind = RecKind::Hybrid;
        for _ in 0..3 {
            kind = kind.next();
        }
        assert_eq!(kind, RecKind::Hybrid);
        assert_eq!(RecKind::Cf.prev(), RecKind::Hybrid);
    }
}
