/// Last successfully reported outcome for a set, shown on the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

impl SessionRecord {
    #[must_use]
    pub fn new(score: u32, total: u32, percentage: u32) -> Self {
        Self {
            score,
            total,
            percentage,
        }
    }

    /// Build a record, deriving the percentage from the score.
    #[must_use]
    pub fn from_score(score: u32, total: u32) -> Self {
        Self::new(score, total, percentage(score, total))
    }
}

/// `round(100 * score / total)` with halves rounded up.
///
/// An empty total yields `0` rather than dividing by zero.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(10, 15), 67);
        assert_eq!(percentage(0, 15), 0);
        assert_eq!(percentage(15, 15), 100);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(3, 8), 38);
    }

    #[test]
    fn empty_total_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(SessionRecord::from_score(0, 0).percentage, 0);
    }
}
