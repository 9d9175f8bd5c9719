use rustc_hash::FxHashMap;
use serde_json::Map;
use starburst::decode::{RawFeature, RawGeometry};
use starburst::geom::{Point, point};
use starburst::{
    Candidate, ClusterChild, ClusterIndex, Error, Feature, MapView, Result, SelectCluster,
    SelectClusterOptions, SelectEvent, SelectOutcome,
};
use std::sync::Arc;

struct TreeIndex {
    children: FxHashMap<u64, Vec<ClusterChild>>,
}

impl TreeIndex {
    fn new() -> Self {
        Self {
            children: FxHashMap::default(),
        }
    }

    fn cluster(mut self, id: u64, children: Vec<ClusterChild>) -> Self {
        self.children.insert(id, children);
        self
    }

    /// One cluster (id 1) containing `count` leaves fanned along the equator.
    fn flat(count: usize) -> Self {
        Self::new().cluster(1, (0..count).map(|i| leaf(i as f64 * 0.001, 0.0)).collect())
    }
}

impl ClusterIndex for TreeIndex {
    fn children(&self, cluster_id: u64) -> Result<Vec<ClusterChild>> {
        self.children
            .get(&cluster_id)
            .cloned()
            .ok_or(Error::UnknownCluster { cluster_id })
    }
}

fn leaf(lon: f64, lat: f64) -> ClusterChild {
    ClusterChild::Leaf(RawFeature {
        kind: "Feature".to_string(),
        geometry: RawGeometry {
            kind: "Point".to_string(),
            coordinates: vec![lon, lat],
        },
        properties: Map::new(),
    })
}

struct TestMap {
    resolution: f64,
}

impl MapView for TestMap {
    fn resolution(&self) -> f64 {
        self.resolution
    }

    fn center(&self) -> Point {
        point(0.0, 0.0)
    }
}

fn map() -> TestMap {
    TestMap { resolution: 1.0 }
}

fn interaction(index: TreeIndex, options: SelectClusterOptions) -> SelectCluster {
    SelectCluster::new(options, Arc::new(index))
}

fn spread_count(select: &SelectCluster) -> usize {
    select.layer().spread_features().count()
}

#[test]
fn two_member_cluster_expands_on_a_rotated_ring() {
    let mut select = interaction(TreeIndex::flat(2), SelectClusterOptions::default());
    let cluster = Feature::cluster(point(0.0, 0.0), 1, 2);

    let outcome = select.select(cluster, &map()).unwrap();
    assert!(matches!(
        outcome,
        SelectOutcome::Expanded {
            spread: 2,
            animated: false
        }
    ));

    // radius = 1 * 12 * (0.5 + 2/4) = 12, ring rotated 45 degrees.
    assert_eq!(select.layer().len(), 4);
    let expected = 12.0 * std::f64::consts::FRAC_PI_4.sin();
    let targets: Vec<Point> = select.layer().spread_features().map(|s| s.target).collect();
    assert!((targets[0].x - expected).abs() < 1e-9);
    assert!((targets[0].y - expected).abs() < 1e-9);
    assert!((targets[1].x + expected).abs() < 1e-9);
    assert!((targets[1].y + expected).abs() < 1e-9);

    // Every link runs from the cluster center to one spread position.
    for (link, target) in select
        .layer()
        .features()
        .filter_map(|f| f.as_link())
        .zip(&targets)
    {
        assert_eq!(link.start, point(0.0, 0.0));
        assert_eq!(link.end, *target);
    }
}

#[test]
fn ring_radius_scales_with_resolution() {
    let mut select = interaction(TreeIndex::flat(8), SelectClusterOptions::default());
    let center = point(500.0, 500.0);
    let cluster = Feature::cluster(center, 1, 8);
    let resolution = 2.5;

    select
        .select(cluster, &TestMap { resolution })
        .unwrap();

    let expected = resolution * 12.0 * (0.5 + 8.0 / 4.0);
    for spread in select.layer().spread_features() {
        let d = (spread.target - center).length();
        assert!((d - expected).abs() < 1e-9);
    }
}

#[test]
fn empty_selection_clears_everything() {
    let mut select = interaction(TreeIndex::flat(5), SelectClusterOptions::default());
    select
        .select(Feature::cluster(point(0.0, 0.0), 1, 5), &map())
        .unwrap();
    assert_eq!(select.layer().len(), 10);

    let outcome = select.select(SelectEvent::none(), &map()).unwrap();
    assert!(matches!(outcome, SelectOutcome::Cleared));
    assert!(select.layer().is_empty());
    assert!(select.selected().is_empty());
}

#[test]
fn reclicking_a_revealed_feature_is_a_no_op() {
    let mut select = interaction(TreeIndex::flat(5), SelectClusterOptions::default());
    select
        .select(Feature::cluster(point(0.0, 0.0), 1, 5), &map())
        .unwrap();

    let ids: Vec<_> = select.layer().features().map(|f| f.id()).collect();
    let revealed = select
        .layer()
        .features()
        .find(|f| f.is_spread())
        .cloned()
        .unwrap();

    let outcome = select
        .select(
            SelectEvent::new(vec![Candidate::Overlay(revealed)]),
            &map(),
        )
        .unwrap();
    assert!(matches!(outcome, SelectOutcome::Leaf(_)));

    // The expansion is untouched: same features, same order.
    let after: Vec<_> = select.layer().features().map(|f| f.id()).collect();
    assert_eq!(ids, after);
    // The selection is refined to the wrapped leaf.
    assert_eq!(select.selected().len(), 1);
}

#[test]
fn single_member_cluster_is_ignored() {
    let mut select = interaction(TreeIndex::flat(1), SelectClusterOptions::default());
    let outcome = select
        .select(Feature::cluster(point(0.0, 0.0), 1, 1), &map())
        .unwrap();
    assert!(matches!(outcome, SelectOutcome::Ignored));
    assert!(select.layer().is_empty());
    // The clicked feature itself stays selected.
    assert_eq!(select.selected().len(), 1);
}

#[test]
fn plain_point_feature_is_ignored() {
    let mut select = interaction(TreeIndex::new(), SelectClusterOptions::default());
    let outcome = select
        .select(Feature::point(point(3.0, 4.0)), &map())
        .unwrap();
    assert!(matches!(outcome, SelectOutcome::Ignored));
    assert!(select.layer().is_empty());
}

#[test]
fn members_beyond_max_objects_are_dropped() {
    let mut select = interaction(TreeIndex::flat(61), SelectClusterOptions::default());
    let outcome = select
        .select(Feature::cluster(point(0.0, 0.0), 1, 61), &map())
        .unwrap();
    assert!(matches!(outcome, SelectOutcome::Expanded { spread: 60, .. }));
    assert_eq!(spread_count(&select), 60);
    assert_eq!(select.layer().len(), 120);
}

#[test]
fn spiral_is_used_above_circle_max_objects() {
    let mut select = interaction(TreeIndex::flat(20), SelectClusterOptions::default());
    let center = point(0.0, 0.0);
    select.select(Feature::cluster(center, 1, 20), &map()).unwrap();

    let mut last = 0.0;
    for spread in select.layer().spread_features() {
        let d = (spread.target - center).length();
        assert!(d > last);
        last = d;
    }
}

#[test]
fn select_cluster_false_clears_the_primary_selection() {
    let options = SelectClusterOptions {
        select_cluster: false,
        ..SelectClusterOptions::default()
    };
    let mut select = interaction(TreeIndex::flat(5), options);
    select
        .select(Feature::cluster(point(0.0, 0.0), 1, 5), &map())
        .unwrap();
    assert!(select.selected().is_empty());
    assert_eq!(spread_count(&select), 5);
}

#[test]
fn expanding_keeps_the_cluster_selected_by_default() {
    let mut select = interaction(TreeIndex::flat(5), SelectClusterOptions::default());
    select
        .select(Feature::cluster(point(0.0, 0.0), 1, 5), &map())
        .unwrap();
    assert_eq!(select.selected().len(), 1);
    assert!(select.selected()[0].is_cluster());
}

#[test]
fn new_expansion_replaces_the_previous_one() {
    let index = TreeIndex::new()
        .cluster(1, (0..4).map(|i| leaf(i as f64 * 0.001, 0.0)).collect())
        .cluster(2, (0..7).map(|i| leaf(i as f64 * 0.001, 1.0)).collect());
    let mut select = interaction(index, SelectClusterOptions::default());

    select
        .select(Feature::cluster(point(0.0, 0.0), 1, 4), &map())
        .unwrap();
    assert_eq!(select.layer().len(), 8);

    select
        .select(Feature::cluster(point(100.0, 0.0), 2, 7), &map())
        .unwrap();
    // Only the second cluster's features remain.
    assert_eq!(select.layer().len(), 14);
    for spread in select.layer().spread_features() {
        assert_eq!(spread.origin, point(100.0, 0.0));
    }
}

#[test]
fn nested_clusters_flatten_to_their_leaves() {
    let index = TreeIndex::new()
        .cluster(
            1,
            vec![
                ClusterChild::Cluster { cluster_id: 2 },
                leaf(0.001, 0.0),
                ClusterChild::Cluster { cluster_id: 3 },
            ],
        )
        .cluster(2, vec![leaf(0.002, 0.0), leaf(0.003, 0.0)])
        .cluster(3, vec![leaf(0.004, 0.0), leaf(0.005, 0.0)]);
    let mut select = interaction(index, SelectClusterOptions::default());

    let outcome = select
        .select(Feature::cluster(point(0.0, 0.0), 1, 5), &map())
        .unwrap();
    assert!(matches!(outcome, SelectOutcome::Expanded { spread: 5, .. }));
}

#[test]
fn unknown_cluster_ids_surface_as_errors() {
    let mut select = interaction(TreeIndex::new(), SelectClusterOptions::default());
    let result = select.select(Feature::cluster(point(0.0, 0.0), 99, 2), &map());
    assert!(matches!(result, Err(Error::UnknownCluster { cluster_id: 99 })));
}

#[test]
fn resolution_change_closes_the_expansion() {
    let mut select = interaction(TreeIndex::flat(5), SelectClusterOptions::default());
    select
        .select(Feature::cluster(point(0.0, 0.0), 1, 5), &map())
        .unwrap();
    assert!(!select.layer().is_empty());

    select.resolution_changed();
    assert!(select.layer().is_empty());
    assert!(select.selected().is_empty());
}

#[test]
fn cluster_extent_spans_the_flattened_leaves() {
    let index = TreeIndex::new().cluster(1, vec![leaf(-0.001, 0.0), leaf(0.002, 0.001)]);
    let select = interaction(index, SelectClusterOptions::default());

    let extent = select
        .cluster_extent(&Feature::cluster(point(0.0, 0.0), 1, 2))
        .unwrap()
        .unwrap();
    assert!(extent.min_x < 0.0);
    assert!(extent.max_x > 0.0);
    assert!(extent.max_y > extent.min_y);
}

#[test]
fn superimposed_cluster_has_no_extent() {
    let index = TreeIndex::new().cluster(1, vec![leaf(0.001, 0.002), leaf(0.001, 0.002)]);
    let select = interaction(index, SelectClusterOptions::default());

    let extent = select
        .cluster_extent(&Feature::cluster(point(0.0, 0.0), 1, 2))
        .unwrap();
    assert!(extent.is_none());
}

#[test]
fn non_cluster_features_have_no_extent() {
    let select = interaction(TreeIndex::new(), SelectClusterOptions::default());
    let extent = select
        .cluster_extent(&Feature::point(point(0.0, 0.0)))
        .unwrap();
    assert!(extent.is_none());
}
