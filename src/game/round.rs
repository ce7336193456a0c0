/// Card labels in play order. One round per card.
pub const CARDS: [&str; ROUND_COUNT] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

pub const ROUND_COUNT: usize = 13;

/// Bounded counter over [`CARDS`].
///
/// The sequencer never wraps. Refusing to advance past the final card is the
/// session's job; here `advance` simply saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundSequencer {
    index: usize,
}

impl RoundSequencer {
    pub fn new() -> Self {
        RoundSequencer { index: 0 }
    }

    /// Index of the round being played
    pub fn current(&self) -> usize {
        self.index
    }

    /// Card label of the round being played
    pub fn current_card(&self) -> &'static str {
        CARDS[self.index]
    }

    pub fn is_last(&self) -> bool {
        self.index == ROUND_COUNT - 1
    }

    /// Move to the next card
    pub fn advance(&mut self) {
        if !self.is_last() {
            self.index += 1;
        }
    }
}

/// Look up the index of a card label.
pub fn card_index(card: &str) -> Option<usize> {
    CARDS.iter().position(|&c| c == card)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_ace() {
        let seq = RoundSequencer::new();
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.current_card(), "A");
        assert!(!seq.is_last());
    }

    #[test]
    fn test_advance_to_king() {
        let mut seq = RoundSequencer::new();
        for _ in 0..12 {
            seq.advance();
        }
        assert_eq!(seq.current_card(), "K");
        assert!(seq.is_last());
    }

    #[test]
    fn test_advance_saturates() {
        let mut seq = RoundSequencer::new();
        for _ in 0..20 {
            seq.advance();
        }
        assert_eq!(seq.current(), ROUND_COUNT - 1);
    }

    #[test]
    fn test_card_index() {
        assert_eq!(card_index("A"), Some(0));
        assert_eq!(card_index("10"), Some(9));
        assert_eq!(card_index("K"), Some(12));
        assert_eq!(card_index("Joker"), None);
    }
}
