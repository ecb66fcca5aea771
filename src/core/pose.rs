//! Planar pose representation.

use super::math::normalize_angle;
use super::point::Point2D;
use serde::{Deserialize, Serialize};

/// Vehicle pose in world coordinates (x, y, theta)
///
/// Coordinate system: ROS REP-103
/// - X: Forward (positive ahead of vehicle)
/// - Y: Left (positive to vehicle's left)
/// - Theta: Rotation angle in radians, CCW positive from +X axis
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters
    pub x: f32,
    /// Y position in meters
    pub y: f32,
    /// Orientation in radians (CCW positive from +X)
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self { x, y, theta }
    }

    /// Create a pose from a point and a heading
    #[inline]
    pub fn from_point(point: Point2D, theta: f32) -> Self {
        Self {
            x: point.x,
            y: point.y,
            theta,
        }
    }

    /// Get the position as a Point2D
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Get the forward direction as a unit vector
    #[inline]
    pub fn forward(&self) -> Point2D {
        Point2D::new(self.theta.cos(), self.theta.sin())
    }

    /// Distance to another pose (position only)
    #[inline]
    pub fn distance(&self, other: &Pose2D) -> f32 {
        self.position().distance(&other.position())
    }

    /// Angular difference to another pose (radians, normalized to [-pi, pi))
    #[inline]
    pub fn angle_diff(&self, other: &Pose2D) -> f32 {
        normalize_angle(other.theta - self.theta)
    }

    /// Normalize theta to [-pi, pi)
    #[inline]
    pub fn normalize(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, normalize_angle(self.theta))
    }
}

impl PartialEq for Pose2D {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < 1e-6
            && (self.y - other.y).abs() < 1e-6
            && normalize_angle(self.theta - other.theta).abs() < 1e-6
    }
}
