//! Input records.

/// A geographic location supplied by the caller.
///
/// In a request, the first location is the fixed start, the last is the
/// fixed end, and everything in between is an interior waypoint whose
/// visiting order is optimized.
///
/// # Examples
///
/// ```
/// use u_routeplan::models::Location;
///
/// let seoul = Location::new("icn", 37.5665, 126.9780, "Seoul");
/// assert_eq!(seoul.label, "Seoul");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Caller-defined identifier.
    pub id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Human-readable name.
    pub label: String,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let loc = Location::new(3.to_string(), 1.5, -2.5, "Depot");
        assert_eq!(loc.id, "3");
        assert!((loc.latitude - 1.5).abs() < 1e-12);
        assert!((loc.longitude + 2.5).abs() < 1e-12);
    }
}
