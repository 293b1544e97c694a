//! Supported game titles.

use serde::{Deserialize, Serialize};

/// A game title tracked by the coach.
///
/// GRID identifies titles by numeric id; the API accepts the short names
/// "lol" (or "league") and "valorant".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Lol,
    Valorant,
}

impl Game {
    /// GRID title id for this game.
    pub const fn title_id(&self) -> u32 {
        match self {
            Game::Lol => 3,
            Game::Valorant => 21,
        }
    }

    /// Resolve a GRID title id back to a known game.
    pub fn from_title_id(id: u32) -> Option<Self> {
        match id {
            3 => Some(Game::Lol),
            21 => Some(Game::Valorant),
            _ => None,
        }
    }

    /// Parse a user-supplied game name ("league" normalizes to LoL).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lol" | "league" => Some(Game::Lol),
            "valorant" => Some(Game::Valorant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Lol => "lol",
            Game::Valorant => "valorant",
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_ids_round_trip() {
        assert_eq!(Game::Lol.title_id(), 3);
        assert_eq!(Game::Valorant.title_id(), 21);
        assert_eq!(Game::from_title_id(3), Some(Game::Lol));
        assert_eq!(Game::from_title_id(21), Some(Game::Valorant));
        assert_eq!(Game::from_title_id(5), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Game::parse("lol"), Some(Game::Lol));
        assert_eq!(Game::parse("league"), Some(Game::Lol));
        assert_eq!(Game::parse("LEAGUE"), Some(Game::Lol));
        assert_eq!(Game::parse("valorant"), Some(Game::Valorant));
        assert_eq!(Game::parse("dota"), None);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Game::Lol).unwrap(), "\"lol\"");
        let parsed: Game = serde_json::from_str("\"valorant\"").unwrap();
        assert_eq!(parsed, Game::Valorant);
    }
}
