//! Integer grid coordinates
//!
//! Positions are lattice points (x, z); the world Y axis carries elevation.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the arena lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub z: i32,
}

impl GridPosition {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Manhattan distance (the pathfinding heuristic)
    pub fn manhattan_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }

    /// Squared Euclidean distance (used for sight radii and the circle test)
    pub fn distance_squared(&self, other: &Self) -> i32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Chebyshev adjacency: within one step in both axes, including equality
    pub fn is_adjacent(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= 1 && (self.z - other.z).abs() <= 1
    }

    /// The 4 cardinal neighbors (movement steps)
    pub fn cardinal_neighbors(&self) -> [GridPosition; 4] {
        [
            GridPosition::new(self.x - 1, self.z),
            GridPosition::new(self.x + 1, self.z),
            GridPosition::new(self.x, self.z - 1),
            GridPosition::new(self.x, self.z + 1),
        ]
    }

    /// All 8 neighbors including diagonals (threat range)
    pub fn all_neighbors(&self) -> [GridPosition; 8] {
        [
            GridPosition::new(self.x - 1, self.z - 1),
            GridPosition::new(self.x - 1, self.z),
            GridPosition::new(self.x - 1, self.z + 1),
            GridPosition::new(self.x, self.z - 1),
            GridPosition::new(self.x, self.z + 1),
            GridPosition::new(self.x + 1, self.z - 1),
            GridPosition::new(self.x + 1, self.z),
            GridPosition::new(self.x + 1, self.z + 1),
        ]
    }

    /// Integer Bresenham line from self to end, inclusive of both endpoints
    pub fn line_to(&self, end: &Self) -> Vec<GridPosition> {
        let mut line = Vec::new();

        let mut x = self.x;
        let mut z = self.z;
        let dx = (end.x - self.x).abs();
        let dz = (end.z - self.z).abs();
        let sx = if self.x < end.x { 1 } else { -1 };
        let sz = if self.z < end.z { 1 } else { -1 };
        let mut err = dx - dz;

        loop {
            line.push(GridPosition::new(x, z));
            if x == end.x && z == end.z {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dz {
                err -= dz;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                z += sz;
            }
        }

        line
    }
}

impl std::ops::Add for GridPosition {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, z: self.z + rhs.z }
    }
}

impl std::ops::Sub for GridPosition {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, z: self.z - rhs.z }
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let a = GridPosition::new(3, 4);
        let b = GridPosition::new(1, 2);
        assert_eq!(a + b, GridPosition::new(4, 6));
        assert_eq!(a - b, GridPosition::new(2, 2));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridPosition::new(0, 0);
        let b = GridPosition::new(3, -4);
        assert_eq!(a.manhattan_distance(&b), 7);
    }

    #[test]
    fn test_adjacency_includes_diagonals_and_self() {
        let a = GridPosition::new(5, 5);
        assert!(a.is_adjacent(&GridPosition::new(6, 6)));
        assert!(a.is_adjacent(&GridPosition::new(5, 4)));
        assert!(a.is_adjacent(&a));
        assert!(!a.is_adjacent(&GridPosition::new(7, 5)));
    }

    #[test]
    fn test_neighbor_counts() {
        let a = GridPosition::new(0, 0);
        assert_eq!(a.cardinal_neighbors().len(), 4);
        assert_eq!(a.all_neighbors().len(), 8);
    }

    #[test]
    fn test_line_endpoints() {
        let a = GridPosition::new(0, 0);
        let b = GridPosition::new(4, 2);
        let line = a.line_to(&b);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
    }

    #[test]
    fn test_line_straight() {
        let a = GridPosition::new(0, 0);
        let b = GridPosition::new(3, 0);
        let line = a.line_to(&b);
        assert_eq!(line.len(), 4);
        for (i, pos) in line.iter().enumerate() {
            assert_eq!(*pos, GridPosition::new(i as i32, 0));
        }
    }

    #[test]
    fn test_line_degenerate() {
        let a = GridPosition::new(2, 2);
        assert_eq!(a.line_to(&a), vec![a]);
    }
}
