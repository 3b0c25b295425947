/// Direction the snake head travels in.
///
/// Rows grow downwards, so `North` moves towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns the (row, col) delta for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.delta(), (-1, 0));
        assert_eq!(Direction::South.delta(), (1, 0));
        assert_eq!(Direction::West.delta(), (0, -1));
        assert_eq!(Direction::East.delta(), (0, 1));
    }

    #[test]
    fn test_opposite_cancels_delta() {
        for dir in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ] {
            let (dr, dc) = dir.delta();
            let (or, oc) = dir.opposite().delta();
            assert_eq!((dr + or, dc + oc), (0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }
}
