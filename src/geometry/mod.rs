//! Geometric primitives used by page and XObject boxes.

use serde::Serialize;

/// A PDF rectangle given by two corners, as written in `[llx lly urx ury]`.
///
/// PDF Spec: ISO 32000-1:2008, Section 7.9.5 - Rectangles. Writers may give
/// any two diagonally opposite corners; [`Rectangle::normalized`] orders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    /// Lower-left x
    pub llx: f64,
    /// Lower-left y
    pub lly: f64,
    /// Upper-right x
    pub urx: f64,
    /// Upper-right y
    pub ury: f64,
}

impl Rectangle {
    /// Create a new rectangle from two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_validate::geometry::Rectangle;
    ///
    /// let rect = Rectangle::new(0.0, 0.0, 612.0, 792.0);
    /// assert_eq!(rect.width(), 612.0);
    /// assert_eq!(rect.height(), 792.0);
    /// ```
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Build from a slice of exactly four numbers.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [llx, lly, urx, ury] => Some(Self::new(*llx, *lly, *urx, *ury)),
            _ => None,
        }
    }

    /// Same rectangle with `ll` below and left of `ur`.
    pub fn normalized(&self) -> Self {
        Self {
            llx: self.llx.min(self.urx),
            lly: self.lly.min(self.ury),
            urx: self.llx.max(self.urx),
            ury: self.lly.max(self.ury),
        }
    }

    /// Width (always non-negative).
    pub fn width(&self) -> f64 {
        (self.urx - self.llx).abs()
    }

    /// Height (always non-negative).
    pub fn height(&self) -> f64 {
        (self.ury - self.lly).abs()
    }

    /// True if the rectangle has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        assert!(Rectangle::from_slice(&[0.0, 0.0, 10.0]).is_none());
        let rect = Rectangle::from_slice(&[0.0, 0.0, 10.0, 20.0]).unwrap();
        assert_eq!(rect.height(), 20.0);
    }

    #[test]
    fn test_normalized() {
        let rect = Rectangle::new(100.0, 50.0, 0.0, 0.0).normalized();
        assert_eq!(rect, Rectangle::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Rectangle::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(!Rectangle::new(0.0, 0.0, 5.0, 10.0).is_degenerate());
    }
}
