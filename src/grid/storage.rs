//! Occupancy-grid input model.
//!
//! The grid is consumed read-only by the planner and handed to the
//! appendix resolvers; it is never mutated during planning.

use crate::core::{Point2D, Pose2D};

/// Occupancy probability below which a cell counts as free.
pub const FREE_THRESHOLD: u8 = 50;
/// Occupancy probability at or above which a cell counts as occupied.
pub const OCCUPIED_THRESHOLD: u8 = 70;

/// A 2D occupancy grid in world coordinates.
///
/// Cells are stored row-major. Raw cell values are `-1` for unknown or
/// `0..=100` for an occupancy probability; queries see the normalized
/// value `min(100, raw + 1)` so unknown maps to 0 and known cells to
/// `1..=100`.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    /// Resolution in meters per cell
    resolution: f32,
    /// World pose of cell (0, 0); orientation rotates the whole grid
    origin: Pose2D,
    cells: Vec<i8>,
}

impl OccupancyGrid {
    /// Create a grid from raw cell data.
    ///
    /// `cells` is row-major with `width * height` entries.
    pub fn new(width: usize, height: usize, resolution: f32, origin: Pose2D, cells: Vec<i8>) -> Self {
        assert_eq!(cells.len(), width * height, "cell data does not match grid dimensions");
        Self {
            width,
            height,
            resolution,
            origin,
            cells,
        }
    }

    /// Create a grid with every cell unknown.
    pub fn unknown(width: usize, height: usize, resolution: f32, origin: Pose2D) -> Self {
        Self::new(width, height, resolution, origin, vec![-1; width * height])
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resolution in meters per cell
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World pose of cell (0, 0)
    #[inline]
    pub fn origin(&self) -> Pose2D {
        self.origin
    }

    /// Raw cell value (`-1` unknown, `0..=100` probability)
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Option<i8> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Normalized occupancy value: 0 for unknown, `raw + 1` capped at 100.
    #[inline]
    pub fn occupancy(&self, x: usize, y: usize) -> Option<u8> {
        self.cell(x, y)
            .map(|raw| 100.min(raw as i16 + 1).max(0) as u8)
    }

    /// Whether the cell has never been observed.
    #[inline]
    pub fn is_unknown(&self, x: usize, y: usize) -> bool {
        matches!(self.cell(x, y), Some(raw) if raw < 0)
    }

    /// Whether the cell is known free (below [`FREE_THRESHOLD`]).
    #[inline]
    pub fn is_free(&self, x: usize, y: usize) -> bool {
        matches!(self.occupancy(x, y), Some(occ) if occ > 0 && occ < FREE_THRESHOLD)
    }

    /// Whether the cell is occupied (at or above [`OCCUPIED_THRESHOLD`]).
    #[inline]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        matches!(self.occupancy(x, y), Some(occ) if occ >= OCCUPIED_THRESHOLD)
    }

    /// Convert a world point to cell indices.
    ///
    /// Returns `None` when the point falls outside the grid.
    pub fn world_to_cell(&self, p: Point2D) -> Option<(usize, usize)> {
        let rel = p - self.origin.position();
        let cos_t = self.origin.theta.cos();
        let sin_t = self.origin.theta.sin();
        // rotate into the grid frame
        let gx = rel.x * cos_t + rel.y * sin_t;
        let gy = -rel.x * sin_t + rel.y * cos_t;

        let cx = (gx / self.resolution).floor();
        let cy = (gy / self.resolution).floor();
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        if cx < self.width && cy < self.height {
            Some((cx, cy))
        } else {
            None
        }
    }

    /// World coordinates of a cell center.
    pub fn cell_to_world(&self, x: usize, y: usize) -> Point2D {
        let gx = (x as f32 + 0.5) * self.resolution;
        let gy = (y as f32 + 0.5) * self.resolution;
        let cos_t = self.origin.theta.cos();
        let sin_t = self.origin.theta.sin();
        Point2D::new(
            self.origin.x + gx * cos_t - gy * sin_t,
            self.origin.y + gx * sin_t + gy * cos_t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn grid_with(cells: Vec<i8>) -> OccupancyGrid {
        OccupancyGrid::new(2, 2, 0.5, Pose2D::default(), cells)
    }

    #[test]
    fn test_occupancy_normalization() {
        let grid = grid_with(vec![-1, 0, 49, 100]);
        assert_eq!(grid.occupancy(0, 0), Some(0)); // unknown -> 0
        assert_eq!(grid.occupancy(1, 0), Some(1));
        assert_eq!(grid.occupancy(0, 1), Some(50));
        assert_eq!(grid.occupancy(1, 1), Some(100)); // capped at 100
    }

    #[test]
    fn test_cell_classification() {
        let grid = grid_with(vec![-1, 10, 69, 90]);
        assert!(grid.is_unknown(0, 0));
        assert!(!grid.is_free(0, 0));
        assert!(grid.is_free(1, 0));
        assert!(grid.is_occupied(0, 1)); // 69 + 1 hits the threshold
        assert!(grid.is_occupied(1, 1));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = grid_with(vec![0; 4]);
        assert_eq!(grid.cell(2, 0), None);
        assert!(!grid.is_occupied(0, 5));
    }

    #[test]
    fn test_world_cell_roundtrip() {
        let grid = OccupancyGrid::unknown(10, 10, 0.1, Pose2D::new(1.0, 2.0, 0.0));
        let center = grid.cell_to_world(3, 7);
        assert_eq!(grid.world_to_cell(center), Some((3, 7)));
    }

    #[test]
    fn test_rotated_origin() {
        // Grid rotated 90 degrees: grid +X maps to world +Y
        let grid = OccupancyGrid::unknown(10, 10, 1.0, Pose2D::new(0.0, 0.0, FRAC_PI_2));
        let p = grid.cell_to_world(2, 0);
        assert_relative_eq!(p.x, -0.5, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.5, epsilon = 1e-5);
        assert_eq!(grid.world_to_cell(p), Some((2, 0)));
    }
}
