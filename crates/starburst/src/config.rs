use crate::style::Style;
use serde::Deserialize;

/// Options for [`SelectCluster`](crate::SelectCluster).
///
/// Field names deserialize from the camelCase keys hosts conventionally use
/// (`pointRadius`, `circleMaxObjects`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectClusterOptions {
    /// Marker radius in pixels, used to derive distances between spread
    /// features.
    pub point_radius: f64,
    /// Largest member count placed on a circle; above this the spiral is used
    /// (when enabled).
    pub circle_max_objects: usize,
    /// Hard cap on drawn spread features; members beyond it are hidden.
    pub max_objects: usize,
    /// Place large clusters on an outward spiral instead of truncating the
    /// circle.
    pub spiral: bool,
    /// Animate the spread from the cluster center.
    pub animate: bool,
    #[serde(rename = "animationDuration")]
    pub animation_duration_ms: f64,
    /// Keep the cluster itself selected after expanding it.
    pub select_cluster: bool,
    /// Whether the overlay layer wraps across the antimeridian.
    pub wrap_x: bool,
    /// Style applied to revealed features by the overlay layer.
    pub feature_style: Option<Style>,
}

impl Default for SelectClusterOptions {
    fn default() -> Self {
        Self {
            point_radius: 12.0,
            circle_max_objects: 10,
            max_objects: 60,
            spiral: true,
            animate: false,
            animation_duration_ms: 500.0,
            select_cluster: true,
            wrap_x: true,
            feature_style: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = SelectClusterOptions::default();
        assert_eq!(opts.point_radius, 12.0);
        assert_eq!(opts.circle_max_objects, 10);
        assert_eq!(opts.max_objects, 60);
        assert!(opts.spiral);
        assert!(!opts.animate);
        assert_eq!(opts.animation_duration_ms, 500.0);
        assert!(opts.select_cluster);
        assert!(opts.wrap_x);
        assert!(opts.feature_style.is_none());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let opts: SelectClusterOptions = serde_json::from_str(
            r#"{"pointRadius": 8, "circleMaxObjects": 6, "animate": true, "animationDuration": 250}"#,
        )
        .unwrap();
        assert_eq!(opts.point_radius, 8.0);
        assert_eq!(opts.circle_max_objects, 6);
        assert!(opts.animate);
        assert_eq!(opts.animation_duration_ms, 250.0);
        // Unspecified fields fall back to defaults.
        assert_eq!(opts.max_objects, 60);
        assert!(opts.spiral);
    }
}
