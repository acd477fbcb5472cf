//! Read-only frame snapshot and vector line art.
//!
//! Nothing here feeds back into the simulation.  A renderer takes a
//! `FrameView`, asks for outlines in arena coordinates and draws them however
//! it likes.

use crate::entities::{Aircraft, Bubble, Bullet, Phase};
use crate::store::EntityStore;

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub arena_width: f32,
    pub arena_height: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub store: &'a EntityStore,
    pub score: u32,
    pub time_left: u32,
    pub phase: Phase,
}

impl<'a> FrameView<'a> {
    pub fn aircraft(&self) -> &'a Aircraft {
        &self.store.aircraft
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &'a Bubble> {
        self.store.bubbles.values()
    }

    pub fn bullets(&self) -> impl Iterator<Item = &'a Bullet> {
        self.store.bullets.values()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A straight stroke between two arena points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

fn seg(x0: f32, y0: f32, x1: f32, y1: f32) -> Segment {
    Segment {
        from: Point::new(x0, y0),
        to: Point::new(x1, y1),
    }
}

/// Aircraft as line art: fuselage, two swept wings, two tail fins.
pub fn aircraft_outline(aircraft: &Aircraft) -> Vec<Segment> {
    let cx = aircraft.x + aircraft.width / 2.0;
    let cy = aircraft.y + aircraft.height / 2.0;
    let hw = aircraft.width / 2.0;
    let hh = aircraft.height / 2.0;
    let wing_drop = aircraft.height / 6.0;
    let fin_span = aircraft.width / 6.0;
    let fin_root = aircraft.height / 3.0;

    vec![
        // Fuselage
        seg(cx, cy - hh, cx, cy + hh),
        // Wings
        seg(cx, cy, cx - hw, cy + wing_drop),
        seg(cx, cy, cx + hw, cy + wing_drop),
        // Tail
        seg(cx, cy + hh, cx - fin_span, cy + fin_root),
        seg(cx, cy + hh, cx + fin_span, cy + fin_root),
    ]
}

/// Bullet as a closed triangle: base along `y`, tip one height above.
pub fn bullet_outline(bullet: &Bullet, width: f32, height: f32) -> [Segment; 3] {
    let left = Point::new(bullet.x, bullet.y);
    let right = Point::new(bullet.x + width, bullet.y);
    let tip = Point::new(bullet.x + width / 2.0, bullet.y - height);
    [
        Segment { from: left, to: right },
        Segment { from: right, to: tip },
        Segment { from: tip, to: left },
    ]
}

/// Points on a bubble's rim, evenly spaced.
pub fn bubble_rim(bubble: &Bubble, samples: usize) -> Vec<Point> {
    let samples = samples.max(3);
    (0..samples)
        .map(|i| {
            let theta = std::f32::consts::TAU * i as f32 / samples as f32;
            Point::new(
                bubble.x + bubble.radius * theta.cos(),
                bubble.y + bubble.radius * theta.sin(),
            )
        })
        .collect()
}

/// The arena border rectangle.
pub fn arena_border(width: f32, height: f32) -> [Segment; 4] {
    [
        seg(0.0, 0.0, width, 0.0),
        seg(width, 0.0, width, height),
        seg(width, height, 0.0, height),
        seg(0.0, height, 0.0, 0.0),
    ]
}
