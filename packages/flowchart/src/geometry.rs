//! Screen-space geometry for nodes, handles and edge curves.
//!
//! World coordinates map to screen coordinates through a [`Viewport`]:
//! `screen = world * zoom + pan`.

use serde::{Deserialize, Serialize};

use crate::model::{Node, Point};

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 4.0;

/// Segments used when flattening a curve for hit-testing
pub const HIT_TEST_SEGMENTS: usize = 32;

/// Node box and handle dimensions, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMetrics {
    pub width: f64,
    pub height: f64,
    pub handle_size: f64,
    pub handle_offset: f64,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 55.0,
            handle_size: 24.0,
            handle_offset: 8.0,
        }
    }
}

impl NodeMetrics {
    /// Horizontal offset of the input handle from the node center
    pub fn input_x(&self) -> f64 {
        -(self.width / 2.0 + self.handle_offset)
    }

    /// Horizontal offset of the output handle from the node center
    pub fn output_x(&self) -> f64 {
        self.width / 2.0 + self.handle_offset
    }

    /// Whether a world point falls inside the node's box
    pub fn contains(&self, node: &Node, world: Point) -> bool {
        (world.x - node.position.x).abs() <= self.width / 2.0
            && (world.y - node.position.y).abs() <= self.height / 2.0
    }
}

/// Canvas pan and zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan: Point,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(pan: Point, zoom: f64) -> Self {
        Self {
            pan,
            zoom: clamp_zoom(zoom),
        }
    }

    pub fn to_screen(&self, world: Point) -> Point {
        world * self.zoom + self.pan
    }

    pub fn to_world(&self, screen: Point) -> Point {
        (screen - self.pan) * (1.0 / self.zoom)
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        1.0
    }
}

/// Screen position of a node's input (left) handle
pub fn input_handle(node: &Node, metrics: &NodeMetrics, viewport: &Viewport) -> Point {
    viewport.to_screen(node.position + Point::new(metrics.input_x(), 0.0))
}

/// Screen position of a node's output (right) handle
pub fn output_handle(node: &Node, metrics: &NodeMetrics, viewport: &Viewport) -> Point {
    viewport.to_screen(node.position + Point::new(metrics.output_x(), 0.0))
}

/// Cubic Bezier curve in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicBezier {
    /// Evaluate the curve at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// Visual center of the curve (`t = 0.5`)
    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// Approximate the curve with `segments` straight segments
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }

    /// Shortest distance from `point` to the flattened curve
    pub fn distance_to(&self, point: Point) -> f64 {
        self.flatten(HIT_TEST_SEGMENTS)
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.distance_to(point) <= tolerance
    }
}

/// Curve drawn for the edge `from -> to`.
///
/// Control points sit horizontally off each handle by
/// `min(|dx| * 0.5, control_cap)`, so vertically stacked nodes get a
/// straight line.
pub fn edge_path(
    from: &Node,
    to: &Node,
    metrics: &NodeMetrics,
    viewport: &Viewport,
    control_cap: f64,
) -> CubicBezier {
    let start = output_handle(from, metrics, viewport);
    let end = input_handle(to, metrics, viewport);
    let control_offset = ((end.x - start.x).abs() * 0.5).min(control_cap);

    CubicBezier {
        start,
        control1: Point::new(start.x + control_offset, start.y),
        control2: Point::new(end.x - control_offset, end.y),
        end,
    }
}

pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq == 0.0 {
        return point.distance_to(a);
    }
    let ap = point - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_sq).clamp(0.0, 1.0);
    point.distance_to(a + ab * t)
}
