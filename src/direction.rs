/// Eight compass directions for beam-shaped fields of view.
///
/// Ordered clockwise on a screen-style grid (x grows right, y grows down),
/// so `East.next()` is `Southeast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    North,
    Northeast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
        Direction::North,
        Direction::Northeast,
    ];

    /// Clockwise neighbour.
    pub fn next(self) -> Direction {
        let index = self as usize;
        Direction::ALL[(index + 1) % 8]
    }

    /// Counter-clockwise neighbour.
    pub fn previous(self) -> Direction {
        let index = self as usize;
        Direction::ALL[(index + 7) % 8]
    }

    /// True for the four ordinal (diagonal) directions.
    pub fn is_diagonal(self) -> bool {
        (self as usize) % 2 == 1
    }

    /// Unit step along this direction, y growing downward.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::Southeast => (1, 1),
            Direction::South => (0, 1),
            Direction::Southwest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::Northwest => (-1, -1),
            Direction::North => (0, -1),
            Direction::Northeast => (1, -1),
        }
    }
}
