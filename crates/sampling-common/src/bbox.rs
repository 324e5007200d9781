//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// A bounding box in a dataset's native coordinate reference.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS (UTM, EPSG:3857, etc.), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a comma separated "minx,miny,maxx,maxy" string.
    pub fn parse(s: &str) -> CommonResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(CommonError::InvalidBbox(format!(
                "{}: expected 'minx,miny,maxx,maxy'",
                s
            )));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| CommonError::InvalidBbox(format!("invalid number '{}'", part)))?;
        }

        let [min_x, min_y, max_x, max_y] = values;
        if min_x > max_x || min_y > max_y {
            return Err(CommonError::InvalidBbox(format!("{}: min exceeds max", s)));
        }

        Ok(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Convert to leaflet corner notation: `(x1, y1, x2, y2) -> ((y1, x1), (y2, x2))`.
    ///
    /// With `invert_y` the two latitudes are swapped, which is what image
    /// overlays expect when the raster origin is the top-left corner.
    pub fn to_leaflet_bounds(&self, invert_y: bool) -> ((f64, f64), (f64, f64)) {
        let (y1, y2) = if invert_y {
            (self.max_y, self.min_y)
        } else {
            (self.min_y, self.max_y)
        };
        ((y1, self.min_x), (y2, self.max_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = BoundingBox::parse("-120.5, 34.4,-120.3,34.6").unwrap();
        assert_eq!(bbox.min_x, -120.5);
        assert_eq!(bbox.min_y, 34.4);
        assert_eq!(bbox.max_x, -120.3);
        assert_eq!(bbox.max_y, 34.6);
    }

    #[test]
    fn test_parse_rejects_inverted() {
        assert!(BoundingBox::parse("10,10,5,5").is_err());
        assert!(BoundingBox::parse("1,2,3").is_err());
        assert!(BoundingBox::parse("a,2,3,4").is_err());
    }

    #[test]
    fn test_leaflet_bounds() {
        let bbox = BoundingBox::new(-120.5, 34.4, -120.3, 34.6);
        assert_eq!(
            bbox.to_leaflet_bounds(false),
            ((34.4, -120.5), (34.6, -120.3))
        );
        assert_eq!(
            bbox.to_leaflet_bounds(true),
            ((34.6, -120.5), (34.4, -120.3))
        );
    }

    #[test]
    fn test_contains_point_edges() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains_point(0.0, 10.0));
        assert!(bbox.contains_point(5.0, 5.0));
        assert!(!bbox.contains_point(-0.1, 5.0));
    }
}
