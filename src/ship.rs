//! Ship specifications and linear placements.

use alloc::string::String;

use crate::config::DEFAULT_SINK_BONUS;

/// A `(row, col)` cell coordinate.
pub type Coord = (usize, usize);

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The cell `offset` steps away from `anchor` along this axis.
    /// Horizontal advances the column, vertical advances the row.
    #[inline]
    pub fn step(self, anchor: Coord, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => (anchor.0, anchor.1 + offset),
            Orientation::Vertical => (anchor.0 + offset, anchor.1),
        }
    }
}

/// Roster entry: the name, length and sink bonus of one ship.
///
/// Several entries may share a name. Ships that share a name are expected to
/// share length and bonus as well; this is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSpec {
    name: String,
    length: usize,
    #[cfg_attr(feature = "std", serde(default = "default_sink_bonus"))]
    sink_bonus: i64,
}

#[cfg(feature = "std")]
fn default_sink_bonus() -> i64 {
    DEFAULT_SINK_BONUS
}

impl ShipSpec {
    /// Create a ship spec with the default sink bonus.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
            sink_bonus: DEFAULT_SINK_BONUS,
        }
    }

    /// Override the score awarded when this ship is sunk.
    pub fn with_bonus(mut self, sink_bonus: i64) -> Self {
        self.sink_bonus = sink_bonus;
        self
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Score awarded once when this ship is fully sunk.
    pub fn sink_bonus(&self) -> i64 {
        self.sink_bonus
    }
}

/// Anchor cell and orientation of one placed ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub anchor: Coord,
    pub orientation: Orientation,
}

impl Placement {
    pub const fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            anchor: (row, col),
            orientation,
        }
    }

    /// The `length` consecutive cells covered starting at the anchor. Cells
    /// are not bounds-checked here.
    pub fn cells(&self, length: usize) -> impl Iterator<Item = Coord> + '_ {
        (0..length).map(move |i| self.orientation.step(self.anchor, i))
    }
}

/// A roster entry together with where it ended up on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShip {
    spec: ShipSpec,
    placement: Placement,
}

impl PlacedShip {
    pub(crate) fn new(spec: ShipSpec, placement: Placement) -> Self {
        Self { spec, placement }
    }

    pub fn spec(&self) -> &ShipSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Every cell this ship occupies.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.placement.cells(self.spec.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn horizontal_advances_column() {
        let p = Placement::new(2, 1, Orientation::Horizontal);
        assert_eq!(p.cells(3).collect::<Vec<_>>(), [(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn vertical_advances_row() {
        let p = Placement::new(0, 4, Orientation::Vertical);
        assert_eq!(p.cells(2).collect::<Vec<_>>(), [(0, 4), (1, 4)]);
    }

    #[test]
    fn bonus_defaults_and_overrides() {
        let sub = ShipSpec::new("Submarine", 1);
        assert_eq!(sub.sink_bonus(), DEFAULT_SINK_BONUS);
        assert_eq!(sub.with_bonus(250).sink_bonus(), 250);
    }
}
