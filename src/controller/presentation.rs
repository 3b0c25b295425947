use crate::game::{Cell, Position};

/// Render-side contract. The controller pushes every visible change
/// through these calls; implementations never see the model itself.
pub trait Presentation {
    fn paint_cell(&mut self, pos: Position, cell: Cell);
    fn set_score_display(&mut self, score: u32);
    fn set_time_display(&mut self, seconds: f64);
    fn set_rate_display(&mut self, rate: f64);
    fn show_game_over(&mut self);
    fn clear_game_over(&mut self);
}
