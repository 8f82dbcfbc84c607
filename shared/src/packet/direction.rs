#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// `+1.0` for forward travel, `-1.0` for backward
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Forward => "forward",
                Direction::Backward => "backward",
            }
        )
    }
}

impl std::str::FromStr for Direction {
    type Err = &'static str;

    fn from_str(input: &str) -> Result<Direction, Self::Err> {
        match input {
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            _ => Err("Direction must be 'forward' or 'backward'"),
        }
    }
}
