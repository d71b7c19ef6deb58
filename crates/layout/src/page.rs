use crate::LayoutError;
use serde::Deserialize;

/// Millimetres to PDF points.
pub const MM: f32 = 72.0 / 25.4;

/// Fixed page size and uniform margin, in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// Builds a geometry, failing when the content area would be empty.
    pub fn new(width: f32, height: f32, margin: f32) -> Result<Self, LayoutError> {
        let geometry = Self {
            width,
            height,
            margin,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// A4 portrait with a 15 mm margin.
    pub fn a4() -> Self {
        Self {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin: 15.0 * MM,
        }
    }

    /// US Letter portrait with a 15 mm margin.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 15.0 * MM,
        }
    }

    /// Geometry can also arrive through deserialization, so the engine checks
    /// it again before any layout happens.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let content_width = self.content_width();
        let content_height = self.max_content_height();
        let finite = self.width.is_finite() && self.height.is_finite() && self.margin.is_finite();
        if finite && self.margin < 0.0 {
            return Err(LayoutError::NegativeMargin {
                margin: self.margin,
            });
        }
        if !finite || !(content_width > 0.0) || !(content_height > 0.0) {
            return Err(LayoutError::InvalidGeometry {
                content_width,
                content_height,
            });
        }
        Ok(())
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn max_content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// The bottom margin boundary, measured from the page top.
    pub fn max_y(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_dimensions() {
        let g = PageGeometry::new(400.0, 430.0, 15.0).unwrap();
        assert_eq!(g.content_width(), 370.0);
        assert_eq!(g.max_content_height(), 400.0);
        assert_eq!(g.max_y(), 415.0);
    }

    #[test]
    fn a4_matches_the_paper_size() {
        let g = PageGeometry::a4();
        assert!((g.width - 595.28).abs() < 0.01);
        assert!((g.height - 841.89).abs() < 0.01);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_content_area() {
        assert!(matches!(
            PageGeometry::new(100.0, 500.0, 50.0),
            Err(LayoutError::InvalidGeometry { .. })
        ));
        assert!(PageGeometry::new(500.0, 100.0, 60.0).is_err());
        assert!(PageGeometry::new(-10.0, 100.0, 0.0).is_err());
        assert!(PageGeometry::new(f32::NAN, 100.0, 0.0).is_err());
        assert!(PageGeometry::new(f32::INFINITY, 100.0, 0.0).is_err());
    }

    #[test]
    fn rejects_negative_margin() {
        assert_eq!(
            PageGeometry::new(400.0, 430.0, -10.0),
            Err(LayoutError::NegativeMargin { margin: -10.0 })
        );
        assert!(PageGeometry::new(400.0, 430.0, 0.0).is_ok());
    }
}
