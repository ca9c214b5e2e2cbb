//! Small geometric helpers shared by movement and collision.

use std::collections::HashSet;

use crate::entities::Body;

/// Euclidean distance between two body centres.
pub fn distance(a: &Body, b: &Body) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Two bodies collide when their collision circles overlap.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    distance(a, b) < a.radius + b.radius
}

/// Wrap an x coordinate back into `[0, size]`.
pub fn wrap(x: f64, size: f64) -> f64 {
    if x < 0.0 {
        x + size
    } else if x > size {
        x - size
    } else {
        x
    }
}

/// Advance a body by its velocity, wrapping horizontally.
pub fn advance(body: &Body, size: f64) -> Body {
    Body {
        x: wrap(body.x + body.xspeed, size),
        y: body.y + body.yspeed,
        ..body.clone()
    }
}

/// `bodies` minus anything whose id appears in `removed`.
pub fn cut(bodies: &[Body], removed: &[Body]) -> Vec<Body> {
    let ids: HashSet<&str> = removed.iter().map(|b| b.id.as_str()).collect();
    bodies
        .iter()
        .filter(|b| !ids.contains(b.id.as_str()))
        .cloned()
        .collect()
}
