//! Game configuration model
//!
//! A game is a title plus an ordered list of challenges. Each challenge
//! shows two word/image options and names the target sound; exactly one
//! option carries that sound. Configs are loaded once from JSON and
//! validated before any gameplay starts - a bad config is fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal configuration problems. Any of these blocks game start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config missing title")]
    MissingTitle,
    #[error("config has no challenges")]
    NoChallenges,
    #[error("challenge {challenge} must have exactly 2 pairs, found {found}")]
    BadPairCount { challenge: usize, found: usize },
    #[error("challenge {challenge}, pair {pair} missing word")]
    MissingWord { challenge: usize, pair: usize },
    #[error("challenge {challenge}, pair {pair} missing image")]
    MissingImage { challenge: usize, pair: usize },
    #[error(
        "challenge {challenge}: {matching} pairs match correct sound {sound:?}, expected exactly 1"
    )]
    CorrectSoundMismatch {
        challenge: usize,
        sound: String,
        matching: usize,
    },
}

/// One selectable answer: the word, its sound tag, and its picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub word: String,
    pub sound: String,
    /// Image reference, possibly without extension (see `assets`)
    pub image: String,
    /// Accessibility text for the image
    #[serde(default)]
    pub alt: String,
}

/// One question unit: two options, one of which carries the target sound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    /// Sound tag the child should listen for
    pub correct_sound: String,
    pub pairs: Vec<AnswerOption>,
}

impl Challenge {
    /// Index of the pair carrying the correct sound.
    /// Validation guarantees exactly one match for loaded configs.
    pub fn correct_index(&self) -> Option<usize> {
        self.pairs.iter().position(|p| p.sound == self.correct_sound)
    }
}

/// Victory screen contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VictoryConfig {
    #[serde(default)]
    pub message: Option<String>,
    /// Celebration GIF URL; absent means the front end picks a fallback
    #[serde(default)]
    pub gif: Option<String>,
}

/// Shape of the progress path across the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Winding,
    Zigzag,
    Mountainous,
    Ascending,
    /// Horizontal line; also the fallback for unrecognized style strings
    #[default]
    Straight,
}

impl PathStyle {
    /// Unrecognized names fall back to `Straight`, matching the map
    /// renderer's default arm.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "winding" => PathStyle::Winding,
            "zigzag" => PathStyle::Zigzag,
            "mountainous" => PathStyle::Mountainous,
            "ascending" => PathStyle::Ascending,
            _ => PathStyle::Straight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathStyle::Straight => "straight",
            PathStyle::Winding => "winding",
            PathStyle::Zigzag => "zigzag",
            PathStyle::Mountainous => "mountainous",
            PathStyle::Ascending => "ascending",
        }
    }
}

impl<'de> Deserialize<'de> for PathStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(PathStyle::from_name(&name))
    }
}

/// Character sprite paths per animation state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtagonistConfig {
    #[serde(default)]
    pub idle: Option<String>,
    #[serde(default)]
    pub walking: Option<String>,
    #[serde(default)]
    pub celebrating: Option<String>,
}

/// Map theming and path shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(default)]
    pub path_style: PathStyle,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub protagonist: Option<ProtagonistConfig>,
}

/// A complete game description, immutable for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub title: String,
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub victory: Option<VictoryConfig>,
    #[serde(default)]
    pub map: Option<MapConfig>,
}

impl GameConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Per-field validation. Errors here are fatal: the caller must show
    /// an error state instead of starting the game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingTitle);
        }
        if self.challenges.is_empty() {
            return Err(ConfigError::NoChallenges);
        }

        for (i, challenge) in self.challenges.iter().enumerate() {
            if challenge.pairs.len() != 2 {
                return Err(ConfigError::BadPairCount {
                    challenge: i + 1,
                    found: challenge.pairs.len(),
                });
            }
            for (j, pair) in challenge.pairs.iter().enumerate() {
                if pair.word.trim().is_empty() {
                    return Err(ConfigError::MissingWord {
                        challenge: i + 1,
                        pair: j + 1,
                    });
                }
                if pair.image.trim().is_empty() {
                    return Err(ConfigError::MissingImage {
                        challenge: i + 1,
                        pair: j + 1,
                    });
                }
            }

            // Exactly one option may carry the target sound, otherwise the
            // challenge is unanswerable (or trivially answerable both ways).
            let matching = challenge
                .pairs
                .iter()
                .filter(|p| p.sound == challenge.correct_sound)
                .count();
            if matching != 1 {
                return Err(ConfigError::CorrectSoundMismatch {
                    challenge: i + 1,
                    sound: challenge.correct_sound.clone(),
                    matching,
                });
            }
        }

        Ok(())
    }

    /// Stable storage key derived from the title:
    /// lowercase, every non-alphanumeric char replaced by `_`, prefixed `game_`.
    pub fn storage_key(&self) -> String {
        let sanitized: String = self
            .title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("game_{sanitized}")
    }

    /// Path style from the map section, `Straight` when absent.
    pub fn path_style(&self) -> PathStyle {
        self.map.as_ref().map(|m| m.path_style).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "title": "Help the Dragon Find the /th/ Sound!",
            "challenges": [
                {
                    "id": "c1",
                    "correctSound": "th",
                    "pairs": [
                        { "word": "thin", "sound": "th", "image": "images/thin", "alt": "a thin stick" },
                        { "word": "fin", "sound": "f", "image": "images/fin.png", "alt": "a shark fin" }
                    ]
                },
                {
                    "id": "c2",
                    "correctSound": "th",
                    "pairs": [
                        { "word": "four", "sound": "f", "image": "images/four.jpg" },
                        { "word": "Thor", "sound": "th", "image": "images/thor" }
                    ]
                }
            ],
            "victory": { "message": "You helped the dragon!" },
            "map": { "pathStyle": "winding", "theme": "forest" }
        }"#
        .to_string()
    }

    #[test]
    fn test_parse_valid_config() {
        let config = GameConfig::from_json(&sample_json()).unwrap();
        assert_eq!(config.challenges.len(), 2);
        assert_eq!(config.challenges[0].correct_sound, "th");
        assert_eq!(config.challenges[0].correct_index(), Some(0));
        assert_eq!(config.challenges[1].correct_index(), Some(1));
        assert_eq!(config.path_style(), PathStyle::Winding);
    }

    #[test]
    fn test_missing_title_rejected() {
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.title = "   ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingTitle)));
    }

    #[test]
    fn test_empty_challenges_rejected() {
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.challenges.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoChallenges)));
    }

    #[test]
    fn test_bad_pair_count_rejected() {
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        let extra = config.challenges[0].pairs[0].clone();
        config.challenges[1].pairs.push(extra);
        match config.validate() {
            Err(ConfigError::BadPairCount { challenge, found }) => {
                assert_eq!(challenge, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected BadPairCount, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_word_and_image_rejected() {
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.challenges[0].pairs[1].word = "".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingWord { challenge: 1, pair: 2 })
        ));

        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.challenges[1].pairs[0].image = "".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingImage { challenge: 2, pair: 1 })
        ));
    }

    #[test]
    fn test_correct_sound_must_match_exactly_one_pair() {
        // No pair matches
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.challenges[0].correct_sound = "sh".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CorrectSoundMismatch { challenge: 1, matching: 0, .. })
        ));

        // Both pairs match
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.challenges[0].pairs[1].sound = "th".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CorrectSoundMismatch { challenge: 1, matching: 2, .. })
        ));
    }

    #[test]
    fn test_storage_key_sanitization() {
        let config = GameConfig::from_json(&sample_json()).unwrap();
        assert_eq!(
            config.storage_key(),
            "game_help_the_dragon_find_the__th__sound_"
        );
    }

    #[test]
    fn test_unknown_path_style_falls_back_to_straight() {
        let json = sample_json().replace("\"winding\"", "\"spiral\"");
        let config = GameConfig::from_json(&json).unwrap();
        assert_eq!(config.path_style(), PathStyle::Straight);
    }

    #[test]
    fn test_missing_map_defaults_to_straight() {
        let mut config = GameConfig::from_json(&sample_json()).unwrap();
        config.map = None;
        assert_eq!(config.path_style(), PathStyle::Straight);
    }
}
