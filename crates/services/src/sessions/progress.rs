/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// 1-based position of the current question; 0 when idle.
    pub position: usize,
    pub answered: usize,
    pub score: usize,
    pub is_complete: bool,
}
