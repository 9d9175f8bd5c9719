//! Screen-space placement of spread features.
//!
//! Small clusters are placed evenly on a circle around the cluster center;
//! large clusters walk an outward Archimedean spiral so spacing between
//! successive markers grows instead of crowding the center.

use crate::config::SelectClusterOptions;
use crate::feature::{Feature, LinkFeature, OverlayFeature, SpreadFeature};
use crate::geom::Point;
use std::f64::consts::{FRAC_PI_4, PI, TAU};
use tracing::debug;
use uuid::Uuid;

/// Computes display positions for up to the configured cap of `count` members
/// around `center`. Distances scale with the map resolution so the layout is
/// stable in pixels.
pub fn spread_positions(
    center: Point,
    count: usize,
    resolution: f64,
    options: &SelectClusterOptions,
) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    if !options.spiral || count <= options.circle_max_objects {
        ring_positions(
            center,
            count.min(options.circle_max_objects),
            resolution,
            options.point_radius,
        )
    } else {
        spiral_positions(
            center,
            count.min(options.max_objects),
            resolution,
            options.point_radius,
        )
    }
}

fn ring_positions(center: Point, max: usize, resolution: f64, point_radius: f64) -> Vec<Point> {
    let radius = resolution * point_radius * (0.5 + max as f64 / 4.0);
    (0..max)
        .map(|i| {
            let mut angle = TAU * i as f64 / max as f64;
            // Rotate pairs and quads off the axes so markers don't overlap
            // the connector cross.
            if max == 2 || max == 4 {
                angle += FRAC_PI_4;
            }
            Point::new(
                center.x + radius * angle.sin(),
                center.y + radius * angle.cos(),
            )
        })
        .collect()
}

fn spiral_positions(center: Point, max: usize, resolution: f64, point_radius: f64) -> Vec<Point> {
    // One marker diameter per spiral turn.
    let d = 2.0 * point_radius;
    let mut angle = 0.0_f64;
    let mut positions = Vec::with_capacity(max);
    for _ in 0..max {
        let radius = d / 2.0 + d * angle / (2.0 * PI);
        angle += (d + 0.1) / radius;
        positions.push(Point::new(
            center.x + resolution * radius * angle.sin(),
            center.y + resolution * radius * angle.cos(),
        ));
    }
    positions
}

/// Synthesizes one spread feature and one link feature per placed leaf.
/// Leaves beyond the applicable cap are dropped.
pub fn layout_cluster(
    center: Point,
    leaves: &[Feature],
    resolution: f64,
    options: &SelectClusterOptions,
) -> Vec<OverlayFeature> {
    let positions = spread_positions(center, leaves.len(), resolution, options);
    debug!(
        count = leaves.len(),
        placed = positions.len(),
        spiral = options.spiral && leaves.len() > options.circle_max_objects,
        "laid out cluster"
    );

    let mut features = Vec::with_capacity(positions.len() * 2);
    for (leaf, target) in leaves.iter().zip(positions) {
        features.push(OverlayFeature::Spread(SpreadFeature {
            id: Uuid::new_v4(),
            leaf: leaf.clone(),
            origin: center,
            target,
            style: leaf.style.clone(),
        }));
        features.push(OverlayFeature::Link(LinkFeature {
            id: Uuid::new_v4(),
            start: center,
            end: target,
        }));
    }
    features
}
