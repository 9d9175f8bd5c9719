//! The select-cluster interaction.
//!
//! Wraps the host's click-select behavior: clicking a cluster marker springs
//! its members apart into spread features so one of them can be picked,
//! clicking a revealed member refines the selection, clicking elsewhere
//! closes the expansion.

use crate::animate::{Animation, FrameOutcome};
use crate::config::SelectClusterOptions;
use crate::decode;
use crate::error::Result;
use crate::feature::{Feature, OverlayFeature};
use crate::flatten::flatten_cluster;
use crate::geom::Bounds;
use crate::index::ClusterIndex;
use crate::layout;
use crate::map::{FrameState, MapView};
use crate::overlay::{self, OverlayLayer};
use std::sync::Arc;
use tracing::debug;

/// A feature the host's hit-test produced: either a source feature from the
/// clustered layer, or one of this interaction's own overlay features.
#[derive(Debug, Clone)]
pub enum Candidate {
    Source(Feature),
    Overlay(OverlayFeature),
}

/// A click-select event. The first selectable candidate drives the
/// interaction, matching the underlying select behavior.
#[derive(Debug, Clone, Default)]
pub struct SelectEvent {
    pub selected: Vec<Candidate>,
}

impl SelectEvent {
    pub fn new(selected: Vec<Candidate>) -> Self {
        Self { selected }
    }

    /// An empty selection (a click that hit nothing).
    pub fn none() -> Self {
        Self::default()
    }
}

impl From<Feature> for SelectEvent {
    fn from(feature: Feature) -> Self {
        Self {
            selected: vec![Candidate::Source(feature)],
        }
    }
}

#[derive(Debug)]
pub enum SelectOutcome {
    /// Nothing was selected; the overlay was cleared.
    Cleared,
    /// An already-revealed spread feature was clicked; the expansion stays
    /// put and the wrapped leaf becomes the selection.
    Leaf(Box<Feature>),
    /// The feature resolved to zero or one member; nothing to spread.
    Ignored,
    /// The cluster was expanded.
    Expanded { spread: usize, animated: bool },
}

type SelectFilter = dyn Fn(&Candidate) -> bool + Send + Sync;

pub struct SelectCluster {
    options: SelectClusterOptions,
    index: Arc<dyn ClusterIndex + Send + Sync>,
    overlay: OverlayLayer,
    selected: Vec<Feature>,
    animation: Animation,
    filter: Option<Box<SelectFilter>>,
}

impl SelectCluster {
    pub fn new(
        options: SelectClusterOptions,
        index: Arc<dyn ClusterIndex + Send + Sync>,
    ) -> Self {
        let overlay = OverlayLayer::new(options.wrap_x, options.feature_style.clone());
        Self {
            options,
            index,
            overlay,
            selected: Vec::new(),
            animation: Animation::default(),
            filter: None,
        }
    }

    /// Installs a caller-supplied selection filter. It composes with the
    /// built-in rule that link features are never selectable.
    pub fn with_filter(
        mut self,
        filter: impl Fn(&Candidate) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn options(&self) -> &SelectClusterOptions {
        &self.options
    }

    /// The overlay layer holding revealed features; the host adds it above
    /// the clustered layer.
    pub fn layer(&self) -> &OverlayLayer {
        &self.overlay
    }

    /// The primary selection set.
    pub fn selected(&self) -> &[Feature] {
        &self.selected
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// The hit-test predicate for the underlying click-select mechanism.
    /// Link and ghost features are never selectable; everything else is
    /// subject to the caller-supplied filter.
    pub fn selectable(&self, candidate: &Candidate) -> bool {
        match candidate {
            Candidate::Overlay(OverlayFeature::Link(_))
            | Candidate::Overlay(OverlayFeature::Ghost(_)) => false,
            _ => self.filter.as_ref().is_none_or(|filter| filter(candidate)),
        }
    }

    /// Clears the selection, closes the cluster and removes revealed
    /// features.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.animation.cancel(&mut self.overlay);
        self.overlay.clear();
    }

    /// The view resolution changed: the current expansion no longer matches
    /// the screen-space layout, so it is dropped outright.
    pub fn resolution_changed(&mut self) {
        debug!("resolution changed, closing expansion");
        self.clear();
    }

    /// Handles a click-select event.
    pub fn select(
        &mut self,
        event: impl Into<SelectEvent>,
        map: &dyn MapView,
    ) -> Result<SelectOutcome> {
        let event = event.into();
        let Some(first) = event
            .selected
            .into_iter()
            .find(|candidate| self.selectable(candidate))
        else {
            self.clear();
            return Ok(SelectOutcome::Cleared);
        };

        let feature = match first {
            Candidate::Overlay(OverlayFeature::Spread(spread)) => {
                // Already revealed: keep the expansion and refine the
                // selection to the wrapped leaf.
                self.selected = vec![spread.leaf.clone()];
                return Ok(SelectOutcome::Leaf(Box::new(spread.leaf)));
            }
            Candidate::Overlay(_) => return Ok(SelectOutcome::Ignored),
            Candidate::Source(feature) => feature,
        };

        // A click on any other feature closes the current expansion.
        self.animation.cancel(&mut self.overlay);
        self.overlay.clear();

        self.selected = vec![feature.clone()];
        let leaves = self.resolve_leaves(&feature)?;
        if leaves.len() <= 1 {
            return Ok(SelectOutcome::Ignored);
        }
        if !self.options.select_cluster {
            self.selected.clear();
        }
        let Some(center) = feature.geometry.as_point() else {
            return Ok(SelectOutcome::Ignored);
        };

        let features = layout::layout_cluster(center, &leaves, map.resolution(), &self.options);
        let spread = features.iter().filter(|f| f.is_spread()).count();
        debug!(
            cluster_id = feature.cluster_id(),
            spread,
            animated = self.options.animate,
            "expanded cluster"
        );
        if self.options.animate {
            self.animation.start(
                &mut self.overlay,
                map.center(),
                center,
                features,
                self.options.animation_duration_ms,
            );
        } else {
            self.overlay.set_features(features);
        }
        Ok(SelectOutcome::Expanded {
            spread,
            animated: self.options.animate,
        })
    }

    /// Per-frame render callback while a spread animation is running.
    pub fn render_frame(&mut self, frame: FrameState) -> FrameOutcome {
        self.animation.frame(&mut self.overlay, frame)
    }

    /// Bounding extent of a cluster's recursively flattened leaves, `None`
    /// for non-clusters and for degenerate extents (superimposed points).
    pub fn cluster_extent(&self, feature: &Feature) -> Result<Option<Bounds>> {
        if !feature.is_cluster() {
            return Ok(None);
        }
        let Some(cluster_id) = feature.cluster_id() else {
            return Ok(None);
        };
        let raw = flatten_cluster(self.index.as_ref(), cluster_id, self.options.max_objects)?;
        let leaves = decode::project_features(&raw)?;
        Ok(overlay::leaves_extent(&leaves))
    }

    fn resolve_leaves(&self, feature: &Feature) -> Result<Vec<Feature>> {
        let Some(cluster_id) = feature.cluster_id() else {
            // A plain point is its own single member; nothing to spread.
            return Ok(vec![feature.clone()]);
        };
        let raw = flatten_cluster(self.index.as_ref(), cluster_id, self.options.max_objects)?;
        decode::project_features(&raw)
    }
}
