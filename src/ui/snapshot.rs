use crate::game::{GamePhase, GameSession, CARDS, ROUND_COUNT};

/// One labelled row of the score table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// A player's line in the score entry panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEntry {
    pub name: String,
    /// Score recorded for the current card, shown before it reaches the table.
    pub score: Option<i32>,
    pub focused: bool,
}

/// Everything the renderer needs, computed from a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub headers: Vec<String>,
    /// One row per card, then "Total" and "Wins".
    pub rows: Vec<TableRow>,
    pub current_card: &'static str,
    pub round_number: usize,
    pub round_count: usize,
    pub focused_player: Option<String>,
    pub dealer: Option<String>,
    pub entries: Vec<LiveEntry>,
    pub input: String,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let table = session.table();

        let mut headers = vec!["Card".to_string()];
        headers.extend(session.players().iter().map(|p| p.name().to_string()));

        let mut rows: Vec<TableRow> = CARDS
            .iter()
            .enumerate()
            .map(|(round, &card)| TableRow {
                label: card.to_string(),
                cells: cells(table.round(round)),
            })
            .collect();
        rows.push(TableRow {
            label: "Total".to_string(),
            cells: cells(table.totals()),
        });
        rows.push(TableRow {
            label: "Wins".to_string(),
            cells: cells(table.wins()),
        });

        let round = session.current_round();
        let entries = session
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| LiveEntry {
                name: p.name().to_string(),
                score: p.recorded(round),
                focused: i == session.focus(),
            })
            .collect();

        Snapshot {
            headers,
            rows,
            current_card: session.current_card(),
            round_number: round + 1,
            round_count: ROUND_COUNT,
            focused_player: session.focused_player().map(|p| p.name().to_string()),
            dealer: session.dealer().map(|p| p.name().to_string()),
            entries,
            input: session.input().to_string(),
            phase: session.phase(),
        }
    }

    /// Index into `rows` of the card being played
    pub fn current_row(&self) -> usize {
        self.round_number - 1
    }
}

fn cells<T: ToString>(values: &[Option<T>]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.as_ref().map(T::to_string).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Event, WinRule, DEFAULT_MAX_DIGITS};

    fn session() -> GameSession {
        GameSession::new(&["alice", "bob"], WinRule::Zero, DEFAULT_MAX_DIGITS)
    }

    #[test]
    fn test_initial_snapshot() {
        let snap = Snapshot::from_session(&session());
        assert_eq!(snap.headers, vec!["Card", "Alice", "Bob"]);
        assert_eq!(snap.rows.len(), ROUND_COUNT + 2);
        assert_eq!(snap.rows[0].label, "A");
        assert_eq!(snap.rows[13].label, "Total");
        assert_eq!(snap.rows[14].label, "Wins");
        assert!(snap.rows.iter().all(|r| r.cells == vec!["", ""]));
        assert_eq!(snap.current_card, "A");
        assert_eq!(snap.round_number, 1);
        assert_eq!(snap.focused_player.as_deref(), Some("Alice"));
        assert_eq!(snap.dealer.as_deref(), Some("Alice"));
        assert_eq!(snap.phase, GamePhase::InProgress);
    }

    #[test]
    fn test_live_entries_show_staged_scores() {
        let mut s = session();
        s.handle_event(Event::MoveFocusDown).unwrap();
        s.submit_input("6").unwrap();
        s.handle_event(Event::EnterDigit('1')).unwrap();

        let snap = Snapshot::from_session(&s);
        assert_eq!(snap.entries[0].score, None);
        assert!(!snap.entries[0].focused);
        assert_eq!(snap.entries[1].score, Some(6));
        assert!(snap.entries[1].focused);
        assert_eq!(snap.input, "1");
        // not committed yet
        assert_eq!(snap.rows[13].cells, vec!["", ""]);
    }

    #[test]
    fn test_rows_refresh_on_advance() {
        let mut s = session();
        s.submit_input("0").unwrap();
        s.handle_event(Event::MoveFocusDown).unwrap();
        s.submit_input("5").unwrap();
        s.handle_event(Event::AdvanceRound).unwrap();

        let snap = Snapshot::from_session(&s);
        assert_eq!(snap.rows[0].cells, vec!["0", "5"]);
        assert_eq!(snap.rows[1].cells, vec!["", ""]);
        assert_eq!(snap.rows[13].cells, vec!["0", "5"]);
        assert_eq!(snap.rows[14].cells, vec!["1", "0"]);
        assert_eq!(snap.current_card, "2");
        assert_eq!(snap.current_row(), 1);
        assert_eq!(snap.dealer.as_deref(), Some("Bob"));
        assert_eq!(snap.entries[0].score, None);
    }

    #[test]
    fn test_empty_session_snapshot() {
        let s = GameSession::new::<&str>(&[], WinRule::Zero, DEFAULT_MAX_DIGITS);
        let snap = Snapshot::from_session(&s);
        assert_eq!(snap.headers, vec!["Card"]);
        assert!(snap.entries.is_empty());
        assert!(snap.focused_player.is_none());
        assert!(snap.rows.iter().all(|r| r.cells.is_empty()));
    }
}
