use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputId(pub u32);

/// Bounding box in global compositor coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        let max_x = self.x + self.width;
        let max_y = self.y + self.height;
        (self.x <= x && x < max_x) && (self.y <= y && y < max_y)
    }

    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Squared distance from a point to the closest point of the box.
    #[must_use]
    pub fn distance_squared(&self, x: i32, y: i32) -> i64 {
        let dx = i64::from((self.x - x).max(0).max(x - (self.x + self.width - 1)));
        let dy = i64::from((self.y - y).max(0).max(y - (self.y + self.height - 1)));
        dx * dx + dy * dy
    }
}

/// A physical monitor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub id: OutputId,
    pub name: String,
    pub geometry: Rect,
}

impl Output {
    #[must_use]
    pub fn new(id: OutputId, name: &str, geometry: Rect) -> Self {
        Self {
            id,
            name: name.to_owned(),
            geometry,
        }
    }
}

/// The output closest to a point, preferring the one containing it.
pub fn nearest_output(outputs: &[Output], x: i32, y: i32) -> Option<&Output> {
    outputs
        .iter()
        .min_by_key(|output| output.geometry.distance_squared(x, y))
}
