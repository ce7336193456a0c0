use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::round::{CARDS, ROUND_COUNT};
use crate::error::{RangeError, ScoreError};

/// Which round scores count as a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// Exactly zero points.
    #[default]
    Zero,
    /// Zero or fewer points.
    NonPositive,
}

impl WinRule {
    pub fn is_win(self, score: i32) -> bool {
        match self {
            WinRule::Zero => score == 0,
            WinRule::NonPositive => score <= 0,
        }
    }
}

/// One seat at the table and its score sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    // None = round not recorded yet; reads treat it as 0
    scores: [Option<i32>; ROUND_COUNT],
    // i64 so thirteen maximal i32 scores cannot overflow
    total: i64,
    wins: usize,
    rule: WinRule,
}

impl Player {
    /// Create a player, normalizing the name to title case.
    pub fn new(name: &str, rule: WinRule) -> Self {
        Player {
            name: title_case(name),
            scores: [None; ROUND_COUNT],
            total: 0,
            wins: 0,
            rule,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Wins across every recorded round
    pub fn wins(&self) -> usize {
        self.wins
    }

    /// Score for a round, if one was recorded.
    pub fn recorded(&self, round: usize) -> Option<i32> {
        self.scores.get(round).copied().flatten()
    }

    /// Score for a round with unrecorded rounds reading as 0.
    pub fn score(&self, round: usize) -> i32 {
        self.recorded(round).unwrap_or(0)
    }

    /// Recorded rounds as (card, score) pairs in play order.
    pub fn recorded_scores(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        CARDS
            .iter()
            .zip(self.scores.iter())
            .filter_map(|(&card, s)| s.map(|s| (card, s)))
    }

    /// Record (or overwrite) the score for a round and recompute aggregates.
    ///
    /// `round` must be a valid index; the session only ever passes the
    /// sequencer's current round.
    pub fn record_score(&mut self, round: usize, value: i32) {
        self.scores[round] = Some(value);
        self.total = self.scores.iter().flatten().map(|&s| i64::from(s)).sum();
        self.wins = self
            .scores
            .iter()
            .flatten()
            .filter(|&&s| self.rule.is_win(s))
            .count();
    }

    /// Count wins over rounds `0..=round`, with unrecorded rounds scoring 0.
    pub fn wins_through_round(&self, round: usize) -> Result<usize, RangeError> {
        if round >= ROUND_COUNT {
            return Err(RangeError::RoundOutOfRange {
                index: round,
                len: ROUND_COUNT,
            });
        }
        Ok((0..=round)
            .filter(|&r| self.rule.is_win(self.score(r)))
            .count())
    }
}

/// Parse a typed score. Any `i32` is accepted; surrounding whitespace is not.
pub fn parse_score(input: &str) -> Result<i32, ScoreError> {
    input.parse::<i32>().map_err(|_| ScoreError::InvalidScore {
        input: input.to_string(),
    })
}

/// Trim and capitalize each whitespace-separated word.
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the seat list from raw command-line names.
pub fn players_from_names<S: AsRef<str>>(names: &[S], rule: WinRule) -> Vec<Player> {
    names.iter().map(|n| Player::new(n.as_ref(), rule)).collect()
}

/// Randomize seating before the first round (Fisher-Yates).
pub fn shuffle_players<R: Rng + ?Sized>(players: &mut [Player], rng: &mut R) {
    players.shuffle(rng);
}
