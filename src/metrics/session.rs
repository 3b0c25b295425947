/// Statistics for the current session. Nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub best_score: u32,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_score_tracking() {
        let mut stats = SessionStats::new();

        stats.on_game_over(10);
        assert_eq!(stats.best_score, 10);
        assert_eq!(stats.games_played, 1);

        stats.on_game_over(5);
        assert_eq!(stats.best_score, 10); // Should not decrease
        assert_eq!(stats.games_played, 2);

        stats.on_game_over(15);
        assert_eq!(stats.best_score, 15);
        assert_eq!(stats.games_played, 3);
    }
}
