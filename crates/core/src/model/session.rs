/// Final tally of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    score: usize,
    total: usize,
}

impl SessionOutcome {
    #[must_use]
    pub fn new(score: usize, total: usize) -> Self {
        Self {
            score: score.min(total),
            total,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `round(score / total * 100)`, half rounding up; an empty session is 0%.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let rounded = (self.score * 200 + self.total) / (self.total * 2);
        u8::try_from(rounded).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(SessionOutcome::new(2, 3).percentage(), 67);
        assert_eq!(SessionOutcome::new(1, 3).percentage(), 33);
        assert_eq!(SessionOutcome::new(1, 8).percentage(), 13);
        assert_eq!(SessionOutcome::new(3, 3).percentage(), 100);
    }

    #[test]
    fn empty_session_is_zero_percent() {
        assert_eq!(SessionOutcome::new(0, 0).percentage(), 0);
    }

    #[test]
    fn score_is_capped_at_total() {
        let outcome = SessionOutcome::new(5, 2);
        assert_eq!(outcome.score(), 2);
        assert_eq!(outcome.percentage(), 100);
    }
}
