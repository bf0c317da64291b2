use serde::{Deserialize, Serialize};

/// Grid coordinate, `x` is the column and `y` the row.
pub type GridCoords = (i32, i32);

/// Two dimensional arrangement of subspaces, filled row by row.
///
/// Cells hold subspace ordinals; `0` marks a hole at the end of the last row
/// when the count does not fill the grid.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubspaceGrid {
    width: u32,
    height: u32,
    cells: Vec<Vec<u32>>,
}

impl SubspaceGrid {
    /// Rebuild the grid for `count` subspaces laid out over `rows` rows.
    pub fn update(&mut self, rows: u32, count: u32) {
        let (width, height) = Self::size_for(rows, count);
        self.width = width;
        self.height = height;
        let mut ordinals = 1..=count;
        self.cells = (0..height)
            .map(|_| (0..width).map(|_| ordinals.next().unwrap_or(0)).collect())
            .collect();
    }

    /// `(width, height)` a grid of `rows` rows would have for `count` subspaces.
    pub fn size_for(rows: u32, count: u32) -> (u32, u32) {
        let count = count.max(1);
        let rows = rows.clamp(1, count);
        (count.div_ceil(rows), rows)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ordinal at the given coordinates, `0` if there is none.
    pub fn at(&self, coords: GridCoords) -> u32 {
        let (Ok(x), Ok(y)) = (usize::try_from(coords.0), usize::try_from(coords.1)) else {
            return 0;
        };
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    pub fn coords(&self, x11_id: u32) -> Option<GridCoords> {
        if x11_id == 0 {
            return None;
        }
        self.cells.iter().enumerate().find_map(|(y, row)| {
            row.iter()
                .position(|&cell| cell == x11_id)
                .map(|x| (x as i32, y as i32))
        })
    }
}
