use crate::constants::*;
use serde::*;

/// A coordinate on the 28x28 diamond board, packed into a single u16.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub const fn new(x: u8, y: u8) -> Self {
        Location {
            packed: ((x as u16) << 8) | y as u16,
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    /// True if the coordinate lies on the playable diamond.
    ///
    /// Row `y` of the lower half spans `x` in `[HALF_BOARD - 1 - y, HALF_BOARD + y]`;
    /// the upper half mirrors it.
    pub fn in_bounds(self) -> bool {
        let x = self.x() as i16;
        let y = self.y() as i16;
        let half = HALF_BOARD as i16;
        x + y >= half - 1
            && x + y <= 3 * half - 1
            && x - y <= half
            && y - x <= half
            && x < BOARD_SIZE as i16
            && y < BOARD_SIZE as i16
    }

    /// True if the coordinate lies on the agent's (lower) half.
    pub fn on_friendly_half(self) -> bool {
        self.y() < HALF_BOARD
    }

    pub fn distance_to(self, other: Self) -> f32 {
        let dx = self.x() as f32 - other.x() as f32;
        let dy = self.y() as f32 - other.y() as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Location::from_packed)
    }
}

/// The four diagonal edges of the diamond. Mobile units deploy on one of the
/// owner's edges and travel toward the diagonally opposite one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BoardEdge {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl BoardEdge {
    /// The edge a unit deployed here travels toward.
    pub fn opposite(self) -> BoardEdge {
        match self {
            BoardEdge::BottomLeft => BoardEdge::TopRight,
            BoardEdge::BottomRight => BoardEdge::TopLeft,
            BoardEdge::TopLeft => BoardEdge::BottomRight,
            BoardEdge::TopRight => BoardEdge::BottomLeft,
        }
    }

    pub fn contains(self, loc: Location) -> bool {
        let x = loc.x() as i16;
        let y = loc.y() as i16;
        let half = HALF_BOARD as i16;
        match self {
            BoardEdge::BottomLeft => y < half && x + y == half - 1,
            BoardEdge::BottomRight => y < half && x - y == half,
            BoardEdge::TopLeft => y >= half && y - x == half,
            BoardEdge::TopRight => y >= half && x + y == 3 * half - 1,
        }
    }

    /// All coordinates on this edge, ordered by ascending y.
    pub fn locations(self) -> Vec<Location> {
        let half = HALF_BOARD;
        match self {
            BoardEdge::BottomLeft => (0..half).map(|y| Location::new(half - 1 - y, y)).collect(),
            BoardEdge::BottomRight => (0..half).map(|y| Location::new(half + y, y)).collect(),
            BoardEdge::TopLeft => (half..BOARD_SIZE)
                .map(|y| Location::new(y - half, y))
                .collect(),
            BoardEdge::TopRight => (half..BOARD_SIZE)
                .map(|y| Location::new(3 * half - 1 - y, y))
                .collect(),
        }
    }
}

/// Iterate every in-bounds coordinate of the agent's half, row by row.
pub fn friendly_half() -> impl Iterator<Item = Location> {
    (0..HALF_BOARD)
        .flat_map(|y| (HALF_BOARD - 1 - y..=HALF_BOARD + y).map(move |x| Location::new(x, y)))
}

/// Iterate every in-bounds coordinate on the board, row by row.
pub fn board_cells() -> impl Iterator<Item = Location> {
    (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| Location::new(x, y)))
        .filter(|loc| loc.in_bounds())
}
