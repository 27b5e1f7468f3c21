//! Core geometry types
//!
//! Pure rectangle math shared by the monitor and grid modules. Nothing in
//! here knows about Win32 or how coordinates were obtained.

/// Rectangle in pixel coordinates
///
/// Stored as origin plus extent. OS queries hand us edges (left, top, right,
/// bottom), use [`Rect::from_edges`] for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle from its four edges
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::from_edges(left, top, right, bottom))
        } else {
            None
        }
    }

    /// Returns the area of the rectangle in square pixels
    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }

    /// Divides every component by a DPI scale factor, truncating toward zero
    ///
    /// Edges are converted to an extent before scaling, so
    /// `w = trunc((right - left) / scale)` rather than `trunc(right / scale) - trunc(left / scale)`.
    pub fn scaled_down(&self, scale: f64) -> Rect {
        let div = |v: i32| (f64::from(v) / scale) as i32;
        Rect::new(div(self.x), div(self.y), div(self.w), div(self.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_basic_properties() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.area(), 5000);
        assert!(!rect.is_empty());
    }

    #[test]
    fn rect_from_edges() {
        let rect = Rect::from_edges(-1920, 0, 0, 1040);
        assert_eq!(rect, Rect::new(-1920, 0, 1920, 1040));
        assert!(Rect::from_edges(10, 10, 10, 20).is_empty());
    }

    #[test]
    fn rect_intersection() {
        let rect1 = Rect::new(0, 0, 20, 20);
        let rect2 = Rect::new(10, 10, 20, 20);
        assert_eq!(rect1.intersection(&rect2), Some(Rect::new(10, 10, 10, 10)));

        // Edge-sharing rectangles do not overlap
        let neighbour = Rect::new(20, 0, 10, 20);
        assert!(rect1.intersection(&neighbour).is_none());
    }

    #[test]
    fn scaled_down_truncates_toward_zero() {
        let rect = Rect::new(-1921, 0, 2561, 1401);
        assert_eq!(rect.scaled_down(1.25), Rect::new(-1536, 0, 2048, 1120));
        assert_eq!(rect.scaled_down(1.0), rect);
    }
}
