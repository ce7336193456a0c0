use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::{card_index, GamePhase, GameSession, Player, WinRule};

/// One player's line in a saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Recorded rounds only, keyed by card label.
    pub scores: BTreeMap<String, i32>,
    pub total: i64,
    /// Wins through the saved round, unrecorded rounds counting as 0. Same
    /// figure as the table's Wins row.
    pub wins: usize,
}

/// Point-in-time dump of a session, written when a game finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub players: Vec<PlayerRecord>,
    pub round: usize,
    pub card: String,
    pub phase: GamePhase,
    #[serde(default)]
    pub win_rule: WinRule,
    #[serde(default)]
    pub timestamp: u64,
}

impl PlayerRecord {
    fn from_player(player: &Player, round: usize) -> Self {
        PlayerRecord {
            name: player.name().to_string(),
            scores: player
                .recorded_scores()
                .map(|(card, score)| (card.to_string(), score))
                .collect(),
            total: player.total(),
            // round comes from the sequencer, so it is always in range
            wins: player.wins_through_round(round).unwrap_or_default(),
        }
    }

    /// Recorded scores in play order rather than map order.
    pub fn scores_in_play_order(&self) -> Vec<(&str, i32)> {
        let mut scores: Vec<_> = self
            .scores
            .iter()
            .map(|(card, &score)| (card.as_str(), score))
            .collect();
        scores.sort_by_key(|(card, _)| card_index(card).unwrap_or(usize::MAX));
        scores
    }
}

impl GameRecord {
    pub fn from_session(session: &GameSession, timestamp: u64) -> Self {
        GameRecord {
            players: session
                .players()
                .iter()
                .map(|p| PlayerRecord::from_player(p, session.current_round()))
                .collect(),
            round: session.current_round(),
            card: session.current_card().to_string(),
            phase: session.phase(),
            win_rule: session.win_rule(),
            timestamp,
        }
    }
}
