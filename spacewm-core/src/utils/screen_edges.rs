use crate::errors::{Result, SpaceError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Screen edges and corners, numbered clockwise from the top.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElectricBorder {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
}

impl ElectricBorder {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
        Self::TopLeft,
    ];
}

impl TryFrom<u32> for ElectricBorder {
    type Error = SpaceError;

    fn try_from(value: u32) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| SpaceError::InvalidEdge(value.to_string()))
    }
}

impl FromStr for ElectricBorder {
    type Err = SpaceError;

    fn from_str(s: &str) -> Result<Self> {
        let id: u32 = s
            .trim()
            .parse()
            .map_err(|_| SpaceError::InvalidEdge(s.to_owned()))?;
        Self::try_from(id)
    }
}

/// Parse an edge id list, dropping entries that are not valid edges.
pub fn parse_borders(entries: &[String]) -> Vec<ElectricBorder> {
    let mut borders = vec![];
    for entry in entries {
        match entry.parse::<ElectricBorder>() {
            Ok(border) if !borders.contains(&border) => borders.push(border),
            Ok(_) => {}
            Err(err) => tracing::warn!("Ignoring screen edge: {}", err),
        }
    }
    borders
}

/// Edges reserved for pointer and touch activation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScreenEdges {
    reserved: BTreeSet<ElectricBorder>,
    touch: BTreeSet<ElectricBorder>,
}

impl ScreenEdges {
    pub fn reserve(&mut self, border: ElectricBorder) -> bool {
        self.reserved.insert(border)
    }

    pub fn unreserve(&mut self, border: ElectricBorder) -> bool {
        self.reserved.remove(&border)
    }

    pub fn is_reserved(&self, border: ElectricBorder) -> bool {
        self.reserved.contains(&border)
    }

    pub fn reserve_touch(&mut self, border: ElectricBorder) -> bool {
        self.touch.insert(border)
    }

    pub fn unreserve_touch(&mut self, border: ElectricBorder) -> bool {
        self.touch.remove(&border)
    }

    pub fn is_touch_reserved(&self, border: ElectricBorder) -> bool {
        self.touch.contains(&border)
    }
}
