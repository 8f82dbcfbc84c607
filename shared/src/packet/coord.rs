use glam::DVec2;

/// A world-space coordinate, written `x;y` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord(pub f64, pub f64);

impl Coord {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

impl From<Coord> for DVec2 {
    fn from(coord: Coord) -> Self {
        DVec2::new(coord.0, coord.1)
    }
}

impl From<DVec2> for Coord {
    fn from(point: DVec2) -> Self {
        Coord(point.x, point.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};{}", self.0, self.1)
    }
}

impl std::str::FromStr for Coord {
    type Err = &'static str;

    fn from_str(input: &str) -> Result<Coord, Self::Err> {
        let mut split = input.split(';');
        let (Some(x), Some(y), None) = (split.next(), split.next(), split.next()) else {
            return Err("Coord has unexpected amount of semicolons");
        };
        let x = x.parse().map_err(|_| "Coord contains a bad x coordinate")?;
        let y = y.parse().map_err(|_| "Coord contains a bad y coordinate")?;
        Ok(Coord(x, y))
    }
}
