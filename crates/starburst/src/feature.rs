//! Feature data model.
//!
//! Source features (clusters and leaves) are owned by the host and the
//! clustering index; this module never mutates them. Spread and link features
//! are synthesized per expansion and live only inside the overlay collection.

use crate::geom::Point;
use crate::style::Style;
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Line(Vec<Point>),
}

impl Geometry {
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Geometry::Point(p) => Some(*p),
            Geometry::Line(_) => None,
        }
    }
}

/// A point (or line) entity with application properties.
///
/// Cluster features carry the clustering index's `cluster` / `cluster_id` /
/// `point_count` properties; leaf features carry whatever the application put
/// on them.
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: Uuid,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
    pub style: Option<Style>,
}

impl Feature {
    pub fn point(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry: Geometry::Point(position),
            properties: Map::new(),
            style: None,
        }
    }

    /// A cluster marker as produced by the clustering index.
    pub fn cluster(position: Point, cluster_id: u64, point_count: u64) -> Self {
        let mut feature = Self::point(position);
        feature.properties.insert("cluster".into(), Value::Bool(true));
        feature
            .properties
            .insert("cluster_id".into(), Value::from(cluster_id));
        feature
            .properties
            .insert("point_count".into(), Value::from(point_count));
        feature
    }

    pub fn is_cluster(&self) -> bool {
        self.properties
            .get("cluster")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn cluster_id(&self) -> Option<u64> {
        self.properties.get("cluster_id").and_then(Value::as_u64)
    }

    pub fn point_count(&self) -> Option<u64> {
        self.properties.get("point_count").and_then(Value::as_u64)
    }
}

/// A synthesized marker revealing one leaf of an expanded cluster.
#[derive(Debug, Clone)]
pub struct SpreadFeature {
    pub id: Uuid,
    /// The wrapped original leaf, retrieved from the clustering index.
    pub leaf: Feature,
    /// The cluster center the feature springs out from.
    pub origin: Point,
    /// The computed display position.
    pub target: Point,
    /// The leaf's own style, copied so the marker renders like the original.
    pub style: Option<Style>,
}

/// A synthesized connector line from the cluster center to a spread feature.
/// Render-only: never selectable.
#[derive(Debug, Clone)]
pub struct LinkFeature {
    pub id: Uuid,
    pub start: Point,
    pub end: Point,
}

/// A zero-size placeholder used to force a render tick when an animation
/// starts.
#[derive(Debug, Clone)]
pub struct GhostFeature {
    pub id: Uuid,
    pub position: Point,
    pub style: Style,
}

#[derive(Debug, Clone)]
pub enum OverlayFeature {
    Spread(SpreadFeature),
    Link(LinkFeature),
    Ghost(GhostFeature),
}

impl OverlayFeature {
    pub fn id(&self) -> Uuid {
        match self {
            OverlayFeature::Spread(f) => f.id,
            OverlayFeature::Link(f) => f.id,
            OverlayFeature::Ghost(f) => f.id,
        }
    }

    pub fn is_spread(&self) -> bool {
        matches!(self, OverlayFeature::Spread(_))
    }

    pub fn is_link(&self) -> bool {
        matches!(self, OverlayFeature::Link(_))
    }

    pub fn as_spread(&self) -> Option<&SpreadFeature> {
        match self {
            OverlayFeature::Spread(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&LinkFeature> {
        match self {
            OverlayFeature::Link(f) => Some(f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    #[test]
    fn cluster_constructor_sets_index_properties() {
        let f = Feature::cluster(point(3.0, 4.0), 17, 42);
        assert!(f.is_cluster());
        assert_eq!(f.cluster_id(), Some(17));
        assert_eq!(f.point_count(), Some(42));
    }

    #[test]
    fn plain_point_is_not_a_cluster() {
        let f = Feature::point(point(0.0, 0.0));
        assert!(!f.is_cluster());
        assert_eq!(f.cluster_id(), None);
    }
}
