//! Core geometric types for feature extraction

/// A 2D point in the drawing's user coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Mirror `other` through this point
    pub fn reflect(self, other: Point) -> Point {
        Point::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Positional features of one path, computed once at extraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    /// First point reached (start of the first sub-path)
    pub start: Point,
    /// Last point reached (end of the final sub-path)
    pub end: Point,
    pub centroid: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_point_reflect() {
        let p = Point::new(10.0, 10.0);
        assert_eq!(p.reflect(Point::new(8.0, 5.0)), Point::new(12.0, 15.0));
    }

    #[test]
    fn test_point_midpoint() {
        let m = Point::new(0.0, 0.0).midpoint(Point::new(10.0, -4.0));
        assert_eq!(m, Point::new(5.0, -2.0));
    }
}
