use super::*;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn unit_square() -> Polygon {
    vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ]
}

#[test]
fn overlap_is_strict_on_shared_edges() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    let c = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(!rects_overlap(&a, &b));
    assert!(rects_overlap(&a, &c));
    assert!(rects_overlap(&c, &b));
}

#[test]
fn point_in_polygon_square_and_degenerate() {
    let sq = unit_square();
    assert!(point_in_polygon(vector![0.5, 0.5], &sq));
    assert!(!point_in_polygon(vector![1.5, 0.5], &sq));
    assert!(!point_in_polygon(vector![0.5, -0.1], &sq));
    assert!(!point_in_polygon(vector![0.5, 0.5], &sq[..2]));
}

#[test]
fn diagonal_sweep_is_hexagon_covering_the_path() {
    let hex = swept_polygon(vector![1.0, 1.0], vector![0.0, 0.0], vector![100.0, 100.0], 50.0);
    assert_eq!(hex.len(), 6);
    assert!(point_in_polygon(vector![75.0, 75.0], &hex));
    assert!(point_in_polygon(vector![140.0, 120.0], &hex));
    // off-diagonal corners of the bounding box are not swept
    assert!(!point_in_polygon(vector![140.0, 5.0], &hex));
    assert!(!point_in_polygon(vector![5.0, 140.0], &hex));
}

#[test]
fn all_diagonal_sweeps_contain_both_squares() {
    let start = vector![200.0, 200.0];
    for (dx, dy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        let end = start + vector![dx * 60.0, dy * 60.0];
        let poly = swept_polygon(vector![dx, dy], start, end, 50.0);
        assert_eq!(poly.len(), 6);
        assert!(point_in_polygon(start + vector![25.0, 25.0], &poly));
        assert!(point_in_polygon(end + vector![25.0, 25.0], &poly));
    }
}

#[test]
fn axis_sweep_is_bounding_quad() {
    let quad = swept_polygon(vector![1.0, 0.0], vector![0.0, 0.0], vector![80.0, 0.0], 50.0);
    assert_eq!(quad.len(), 4);
    assert!(point_in_polygon(vector![120.0, 25.0], &quad));
    assert!(!point_in_polygon(vector![140.0, 25.0], &quad));
    let still = swept_polygon(Vector2::zeros(), vector![0.0, 0.0], vector![0.0, 0.0], 50.0);
    assert_eq!(still.len(), 4);
}

#[test]
fn corner_test_misses_piercing_edges_exact_does_not() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let strip = vec![
        vector![-5.0, 4.0],
        vector![15.0, 4.0],
        vector![15.0, 6.0],
        vector![-5.0, 6.0],
    ];
    assert!(!rect_collides_polygon(&rect, &strip));
    assert!(rect_collides_polygon_exact(&rect, &strip));
    assert!(!CollisionModel::Corners.collides(&rect, &strip));
    assert!(CollisionModel::Exact.collides(&rect, &strip));

    let far = Rect::new(100.0, 100.0, 10.0, 10.0);
    assert!(!rect_collides_polygon_exact(&far, &strip));
}

#[test]
fn bounding_union_and_area_rule() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert_eq!(bounding_union(&a, &b), Rect::new(0.0, 0.0, 20.0, 10.0));
    assert!(union_within_area(&a, &b));
    // L-shaped pair: the union would claim empty space
    let c = Rect::new(10.0, 10.0, 10.0, 10.0);
    assert!(!union_within_area(&a, &c));
}

#[test]
fn touching_requires_perpendicular_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let gap = Rect::new(11.0, 2.0, 10.0, 10.0);
    assert!(touching_or_overlapping(&a, &gap, 2.0));
    assert!(!touching_or_overlapping(&a, &gap, 0.5));
    let corner_only = Rect::new(11.0, 11.0, 10.0, 10.0);
    assert!(!touching_or_overlapping(&a, &corner_only, 2.0));
    let below = Rect::new(3.0, 10.0, 4.0, 4.0);
    assert!(touching_or_overlapping(&a, &below, 0.0));
}

#[test]
fn snapping_hits_grid_and_sub_grid() {
    assert_eq!(snap_coordinate(399.995, 10.0, 10.0), 400.0);
    assert_eq!(snap_coordinate(400.004, 10.0, 10.0), 400.0);
    assert_eq!(snap_coordinate(123.4, 10.0, 10.0), 120.0);
    assert_eq!(snap_coordinate(127.0, 10.0, 10.0), 130.0);
    assert_eq!(snap_coordinate(127.0, 10.0, 5.0), 125.0);
    assert_eq!(snap_coordinate(-3.0, 10.0, 10.0), 0.0);
    assert_eq!(
        snap_position(vector![11.2, -11.2], 10.0, 10.0),
        vector![10.0, -10.0]
    );
}

proptest! {
    #[test]
    fn snapping_is_idempotent(coord in -1.0e5f64..1.0e5, sub_idx in 0usize..3) {
        let sub = [10.0, 5.0, 2.5][sub_idx];
        let once = snap_coordinate(coord, 10.0, sub);
        prop_assert_eq!(snap_coordinate(once, 10.0, sub), once);
        prop_assert!((once - coord).abs() <= sub);
    }
}
