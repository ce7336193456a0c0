use rand::Rng;

use super::player::{parse_score, players_from_names, shuffle_players, Player, WinRule};
use super::round::{RoundSequencer, ROUND_COUNT};
use crate::error::ScoreError;

/// Default length limit of the score entry buffer.
pub const DEFAULT_MAX_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    InProgress,
    Complete,
}

/// Input events understood by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    MoveFocusUp,
    MoveFocusDown,
    EnterDigit(char),
    DeleteDigit,
    SubmitScore,
    AdvanceRound,
    Quit,
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The game just finished. Returned once per session.
    Completed,
    Quit,
}

/// Scores as they appear in the table: copied from the ledger whenever a
/// round is closed, so scores typed during a round stay out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    // [round][player]
    rounds: Vec<Vec<Option<i32>>>,
    totals: Vec<Option<i64>>,
    wins: Vec<Option<usize>>,
}

impl ScoreTable {
    fn new(players: usize) -> Self {
        ScoreTable {
            rounds: vec![vec![None; players]; ROUND_COUNT],
            totals: vec![None; players],
            wins: vec![None; players],
        }
    }

    fn commit(&mut self, players: &[Player], through: usize) {
        for (col, player) in players.iter().enumerate() {
            for round in 0..=through {
                self.rounds[round][col] = Some(player.score(round));
            }
            self.totals[col] = Some(player.total());
            self.wins[col] = player.wins_through_round(through).ok();
        }
    }

    pub fn round(&self, round: usize) -> &[Option<i32>] {
        &self.rounds[round]
    }

    pub fn totals(&self) -> &[Option<i64>] {
        &self.totals
    }

    pub fn wins(&self) -> &[Option<usize>] {
        &self.wins
    }
}

/// A single scoreboard session: the seats, the round being played and the
/// entry state. All mutation goes through [`GameSession::handle_event`].
#[derive(Debug, Clone)]
pub struct GameSession {
    players: Vec<Player>,
    rounds: RoundSequencer,
    phase: GamePhase,
    focus: usize,
    input: String,
    max_digits: usize,
    rule: WinRule,
    table: ScoreTable,
}

impl GameSession {
    /// Start a game on the first card. Names are title-cased.
    pub fn new<S: AsRef<str>>(names: &[S], rule: WinRule, max_digits: usize) -> Self {
        let players = players_from_names(names, rule);
        let table = ScoreTable::new(players.len());
        GameSession {
            players,
            rounds: RoundSequencer::new(),
            phase: GamePhase::InProgress,
            focus: 0,
            input: String::new(),
            max_digits,
            rule,
            table,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::Complete
    }

    pub fn current_round(&self) -> usize {
        self.rounds.current()
    }

    pub fn current_card(&self) -> &'static str {
        self.rounds.current_card()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_player(&self) -> Option<&Player> {
        self.players.get(self.focus)
    }

    /// The player dealing this round; the deal rotates one seat per card.
    pub fn dealer(&self) -> Option<&Player> {
        if self.players.is_empty() {
            return None;
        }
        self.players.get(self.rounds.current() % self.players.len())
    }

    /// Digits typed but not yet submitted
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn win_rule(&self) -> WinRule {
        self.rule
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    /// Shuffle the seating order. Meant to be called before play starts.
    pub fn shuffle_seats<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle_players(&mut self.players, rng);
    }

    /// Apply one input event.
    ///
    /// Once the game is complete every event except `Quit` is ignored.
    pub fn handle_event(&mut self, event: Event) -> Result<Step, ScoreError> {
        match event {
            Event::Quit => {
                self.input.clear();
                return Ok(Step::Quit);
            }
            _ if self.is_complete() => {}
            Event::MoveFocusUp => {
                self.focus = self.focus.saturating_sub(1);
            }
            Event::MoveFocusDown => {
                if self.focus + 1 < self.players.len() {
                    self.focus += 1;
                }
            }
            Event::EnterDigit(d) => {
                if d.is_ascii_digit() && self.input.len() < self.max_digits {
                    self.input.push(d);
                }
            }
            Event::DeleteDigit => {
                self.input.pop();
            }
            Event::SubmitScore => {
                let typed = self.input.clone();
                self.submit_input(&typed)?;
            }
            Event::AdvanceRound => return Ok(self.advance_round()),
        }
        Ok(Step::Continue)
    }

    /// Record `input` for the focused player on the current card.
    ///
    /// On a parse failure nothing changes and the pending buffer is kept.
    pub fn submit_input(&mut self, input: &str) -> Result<Step, ScoreError> {
        if self.is_complete() || self.players.is_empty() {
            return Ok(Step::Continue);
        }
        let value = parse_score(input).inspect_err(|err| {
            tracing::warn!(%err, "rejected score entry");
        })?;

        let round = self.rounds.current();
        let player = &mut self.players[self.focus];
        player.record_score(round, value);
        tracing::debug!(
            player = player.name(),
            card = self.rounds.current_card(),
            value,
            total = player.total(),
            "score recorded"
        );
        self.input.clear();
        Ok(Step::Continue)
    }

    fn advance_round(&mut self) -> Step {
        let through = self.rounds.current();
        self.table.commit(&self.players, through);

        if self.rounds.is_last() {
            self.phase = GamePhase::Complete;
            tracing::info!(players = self.players.len(), "game complete");
            return Step::Completed;
        }

        self.rounds.advance();
        self.focus = 0;
        tracing::info!(card = self.rounds.current_card(), "advanced to next round");
        Step::Continue
    }
}
