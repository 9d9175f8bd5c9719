#![forbid(unsafe_code)]

//! Cluster spread-out selection for map viewers (headless).
//!
//! When clicking on a cluster marker, it springs apart to reveal the features
//! in the cluster, placed on a circle (small clusters) or an outward spiral
//! (large ones) and joined to the center by connector links. Revealed
//! features are selectable, so you can pick the one you meant.
//!
//! Design goals:
//! - headless and host-agnostic: the map viewer supplies resolution, view
//!   center, pixel ratio and per-frame callbacks; this crate only computes
//!   geometry and owns the overlay feature set
//! - deterministic, testable outputs (no wall-clock reads; frame timestamps
//!   come from the host render loop)
//! - the clustering index stays external, behind [`ClusterIndex`]

pub mod animate;
pub mod config;
pub mod decode;
pub mod error;
pub mod feature;
pub mod flatten;
pub mod geom;
pub mod index;
pub mod layout;
pub mod map;
pub mod overlay;
pub mod select;
pub mod style;

pub use animate::{Animation, DrawCommand, FrameOutcome, ease_out};
pub use config::SelectClusterOptions;
pub use error::{Error, Result};
pub use feature::{Feature, Geometry, GhostFeature, LinkFeature, OverlayFeature, SpreadFeature};
pub use flatten::flatten_cluster;
pub use geom::{Bounds, Point, Vector};
pub use index::{ClusterChild, ClusterIndex};
pub use map::{FrameState, MapView};
pub use overlay::{OverlayLayer, leaves_extent};
pub use select::{Candidate, SelectCluster, SelectEvent, SelectOutcome};
pub use style::{Fill, ImageStyle, Stroke, Style};
