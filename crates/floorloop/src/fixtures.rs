//! Factory functions for segment sets used in tests and demos.

use shared::Segment;

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::from_coords(x1, y1, x2, y2)
}

// ── Closed loops ────────────────────────────────────────────────

/// Axis-aligned square, counter-clockwise, already in chain order.
pub fn square(size: f64) -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, size, 0.0),
        seg(size, 0.0, size, size),
        seg(size, size, 0.0, size),
        seg(0.0, size, 0.0, 0.0),
    ]
}

/// 10x10 square with the second and third edges stored backwards.
pub fn square_mixed_orientation() -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, 10.0, 0.0),
        seg(10.0, 10.0, 10.0, 0.0),
        seg(10.0, 10.0, 0.0, 10.0),
        seg(0.0, 10.0, 0.0, 0.0),
    ]
}

/// Regular polygon with `sides` edges on a circle of `radius`, in order.
pub fn regular_polygon(sides: usize, radius: f64) -> Vec<Segment> {
    let vertex = |i: usize| {
        let a = std::f64::consts::TAU * (i % sides) as f64 / sides as f64;
        (radius * a.cos(), radius * a.sin())
    };
    (0..sides)
        .map(|i| {
            let (x1, y1) = vertex(i);
            let (x2, y2) = vertex(i + 1);
            seg(x1, y1, x2, y2)
        })
        .collect()
}

/// L-shaped floor outline (six edges), in order.
pub fn l_shape() -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, 20.0, 0.0),
        seg(20.0, 0.0, 20.0, 10.0),
        seg(20.0, 10.0, 10.0, 10.0),
        seg(10.0, 10.0, 10.0, 20.0),
        seg(10.0, 20.0, 0.0, 20.0),
        seg(0.0, 20.0, 0.0, 0.0),
    ]
}

// ── Open / broken sets ──────────────────────────────────────────

/// Three sides of a 10x10 square.
pub fn open_u() -> Vec<Segment> {
    square(10.0)[..3].to_vec()
}

/// Two unrelated segments plus a third sharing no endpoint with either.
pub fn disjoint_three() -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, 10.0, 0.0),
        seg(20.0, 20.0, 20.0, 10.0),
        seg(50.0, 50.0, 60.0, 60.0),
    ]
}

/// Square whose corner joints are off by `offset` in x.
pub fn square_with_jitter(offset: f64) -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, 10.0, 0.0),
        seg(10.0 + offset, 0.0, 10.0, 10.0),
        seg(10.0 - offset, 10.0, 0.0, 10.0),
        seg(0.0 + offset, 10.0, 0.0, 0.0),
    ]
}

/// Tab-separated text for `segments`, one row per segment.
pub fn to_tab_separated(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| format!("{}\t{}\t{}\t{}", s.start.x, s.start.y, s.end.x, s.end.y))
        .collect::<Vec<_>>()
        .join("\n")
}
