//! End-to-end boolean-clip and offset scenarios (S1-S9).

use clipper2::{
    area, orientation, point_in_polygon, ClipType, Clipper, ClipperOffset, EndType, IntPoint,
    JoinType, Path, PolyFillType, PolyType,
};

fn pts(coords: &[(i64, i64)]) -> Path {
    coords.iter().map(|&(x, y)| IntPoint::new(x, y)).collect()
}

fn ring_set_eq(ring: &Path, expected: &[(i64, i64)]) -> bool {
    let expected = pts(expected);
    if ring.len() != expected.len() {
        return false;
    }
    (0..ring.len()).any(|offset| (0..ring.len()).all(|i| ring[i] == expected[(i + offset) % ring.len()]))
}

#[test]
fn s1_intersection_even_odd() {
    let subject = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let clip = pts(&[(5, 5), (15, 5), (15, 15), (5, 15)]);

    let mut c = Clipper::new();
    c.add_path(&subject, PolyType::Subject, true).unwrap();
    c.add_path(&clip, PolyType::Clip, true).unwrap();
    let solution = c
        .execute(ClipType::Intersection, PolyFillType::EvenOdd, PolyFillType::EvenOdd)
        .unwrap();

    assert_eq!(solution.len(), 1);
    assert!(ring_set_eq(&solution[0], &[(5, 5), (10, 5), (10, 10), (5, 10)]));
    assert!(orientation(&solution[0]));
    assert!(area(&solution[0]) > 0.0);
}

#[test]
fn s2_union_area() {
    let subject = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let clip = pts(&[(5, 5), (15, 5), (15, 15), (5, 15)]);

    let mut c = Clipper::new();
    c.add_path(&subject, PolyType::Subject, true).unwrap();
    c.add_path(&clip, PolyType::Clip, true).unwrap();
    let solution = c
        .execute(ClipType::Union, PolyFillType::EvenOdd, PolyFillType::EvenOdd)
        .unwrap();

    assert_eq!(solution.len(), 1);
    assert_eq!(solution[0].len(), 8);
    assert!((area(&solution[0]) - 175.0).abs() < 1e-6);
}

#[test]
fn s3_difference_six_vertices() {
    let subject = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let clip = pts(&[(5, 5), (15, 5), (15, 15), (5, 15)]);

    let mut c = Clipper::new();
    c.add_path(&subject, PolyType::Subject, true).unwrap();
    c.add_path(&clip, PolyType::Clip, true).unwrap();
    let solution = c
        .execute(ClipType::Difference, PolyFillType::EvenOdd, PolyFillType::EvenOdd)
        .unwrap();

    assert_eq!(solution.len(), 1);
    assert!(ring_set_eq(&solution[0], &[(0, 0), (10, 0), (10, 5), (5, 5), (5, 10), (0, 10)]));
}

#[test]
fn s4_xor_two_rings() {
    let subject = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let clip = pts(&[(5, 5), (15, 5), (15, 15), (5, 15)]);

    let mut c = Clipper::new();
    c.add_path(&subject, PolyType::Subject, true).unwrap();
    c.add_path(&clip, PolyType::Clip, true).unwrap();
    let solution = c
        .execute(ClipType::Xor, PolyFillType::EvenOdd, PolyFillType::EvenOdd)
        .unwrap();

    assert_eq!(solution.len(), 2);
    let mut areas: Vec<f64> = solution.iter().map(|r| area(r).abs()).collect();
    areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((areas[0] - 75.0).abs() < 1e-6);
    assert!((areas[1] - 75.0).abs() < 1e-6);
}

#[test]
fn s5_concentric_squares_hole_in_tree() {
    let outer = pts(&[(0, 0), (0, 20), (20, 20), (20, 0)]);
    let inner = pts(&[(5, 5), (15, 5), (15, 15), (5, 15)]);

    let mut c = Clipper::new();
    c.add_path(&outer, PolyType::Subject, true).unwrap();
    c.add_path(&inner, PolyType::Subject, true).unwrap();
    let tree = c
        .execute_poly_tree(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();

    let roots = tree.root_children();
    assert_eq!(roots.len(), 1);
    let outer_node = tree.node(roots[0]);
    assert_eq!(outer_node.child_count(), 1);
    let hole_idx = tree.children(roots[0])[0];
    assert!(tree.is_hole(hole_idx));
}

#[test]
fn s6_touching_squares_merge() {
    let left = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let right = pts(&[(10, 0), (20, 0), (20, 10), (10, 10)]);

    let mut c = Clipper::new();
    c.add_path(&left, PolyType::Subject, true).unwrap();
    c.add_path(&right, PolyType::Subject, true).unwrap();
    let solution = c
        .execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();

    assert_eq!(solution.len(), 1);
    assert!(ring_set_eq(&solution[0], &[(0, 0), (20, 0), (20, 10), (0, 10)]));
}

#[test]
fn s7_square_inflate() {
    let square = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let mut off = ClipperOffset::new(2.0, 0.25);
    off.add_path(&square, JoinType::Miter, EndType::ClosedPolygon);
    let solution = off.execute(2.0).unwrap();

    assert_eq!(solution.len(), 1);
    assert!((area(&solution[0]) - 196.0).abs() < 1e-6);
    assert!(area(&solution[0]) > 0.0);
}

#[test]
fn s8_square_deflate_past_collapse() {
    let square = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let mut off = ClipperOffset::new(2.0, 0.25);
    off.add_path(&square, JoinType::Miter, EndType::ClosedPolygon);
    let solution = off.execute(-6.0).unwrap();

    assert!(solution.is_empty());
}

#[test]
fn s9_open_polyline_round_caps() {
    let line = pts(&[(0, 0), (10, 0), (10, 10)]);
    let mut off = ClipperOffset::new(2.0, 0.25);
    off.add_path(&line, JoinType::Round, EndType::OpenRound);
    let solution = off.execute(1.0).unwrap();

    assert_eq!(solution.len(), 1);
    assert!(area(&solution[0]) > 0.0);
    assert_ne!(point_in_polygon(IntPoint::new(10, 0), &solution[0]), 0);
}
