//! The overlay layer holding synthesized spread and link features.
//!
//! The layer renders above the base map and never mutates source data. It is
//! configured to redraw continuously while animating or interacting, and it
//! holds at most one expansion's features at a time.

use crate::feature::{Feature, GhostFeature, OverlayFeature};
use crate::geom::{Bounds, Point};
use crate::style::Style;
use indexmap::IndexMap;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug)]
pub struct OverlayLayer {
    pub name: String,
    pub update_while_animating: bool,
    pub update_while_interacting: bool,
    pub wrap_x: bool,
    /// Layer-level style applied to revealed features.
    pub style: Option<Style>,
    features: IndexMap<Uuid, OverlayFeature>,
}

impl OverlayLayer {
    pub fn new(wrap_x: bool, style: Option<Style>) -> Self {
        Self {
            name: "Cluster overlay".to_string(),
            update_while_animating: true,
            update_while_interacting: true,
            wrap_x,
            style,
            features: IndexMap::new(),
        }
    }

    pub fn clear(&mut self) {
        if !self.features.is_empty() {
            debug!(count = self.features.len(), "cleared overlay");
        }
        self.features.clear();
    }

    /// Replaces the overlay contents. Prior features are always removed
    /// first, so two expansions never coexist.
    pub fn set_features(&mut self, features: Vec<OverlayFeature>) {
        self.clear();
        self.add_features(features);
    }

    /// Adds features without clearing; used when an animation commits its
    /// pending set into the layer.
    pub fn add_features(&mut self, features: Vec<OverlayFeature>) {
        for feature in features {
            self.features.insert(feature.id(), feature);
        }
    }

    /// Inserts the zero-size placeholder that forces a render tick when an
    /// animation starts. Returns its id so the animator can remove it again.
    pub fn add_ghost(&mut self, position: Point) -> Uuid {
        let ghost = GhostFeature {
            id: Uuid::new_v4(),
            position,
            style: Style::empty_circle(),
        };
        let id = ghost.id;
        self.features.insert(id, OverlayFeature::Ghost(ghost));
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Option<OverlayFeature> {
        self.features.shift_remove(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.features.contains_key(&id)
    }

    /// Features in insertion order.
    pub fn features(&self) -> impl Iterator<Item = &OverlayFeature> {
        self.features.values()
    }

    pub fn spread_features(&self) -> impl Iterator<Item = &crate::feature::SpreadFeature> {
        self.features.values().filter_map(OverlayFeature::as_spread)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Bounding extent of a cluster's flattened leaves, `None` when the extent is
/// degenerate (all leaves superimposed on one point).
pub fn leaves_extent(leaves: &[Feature]) -> Option<Bounds> {
    let bounds = Bounds::from_points(
        leaves
            .iter()
            .filter_map(|leaf| leaf.geometry.as_point()),
    )?;
    if bounds.is_degenerate() {
        None
    } else {
        Some(bounds)
    }
}
