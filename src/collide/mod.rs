
mod project;

pub use project::Projection;

use {
    crate::{
        body::{Body, Circle},
        math::*,
        tile::{Tile, TileKind},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionResult {
    None,
    Axis,
    Other,
}

// each component is -1, 0 or 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub h: i32,
    pub v: i32,
}

impl Region {
    pub fn new(h: i32, v: i32) -> Region {
        debug_assert!((-1 ..= 1).contains(&h) && (-1 ..= 1).contains(&v));
        Region { h, v }
    }

    pub fn of(delta: V2, tile: &Tile) -> Region {
        let code = |d: f32, w: f32|
            if      d < -w { -1 }
            else if w <  d {  1 }
            else           {  0 };

        Region::new(code(delta.x, tile.xw), code(delta.y, tile.yw))
    }

    pub fn hf(&self) -> f32 { self.h as f32 }
    pub fn vf(&self) -> f32 { self.v as f32 }

    pub fn outward(&self) -> V2 {
        let dir = V2::new(self.hf(), self.vf());
        match dir.norm() {
            len if len > 0. => dir / len,
            _               => dir,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub push:   V2,
    pub normal: V2,
    pub result: CollisionResult,
}

impl Contact {
    pub fn axis(push: V2, normal: V2) -> Contact {
        Contact { push, normal, result: CollisionResult::Axis }
    }

    pub fn other(push: V2, normal: V2) -> Contact {
        Contact { push, normal, result: CollisionResult::Other }
    }
}

pub fn projection(kind: TileKind) -> Option<Projection> {
    use {TileKind::*, project::*};
    let projection: Projection = match kind {
        Empty        => return None,
        Full         => full,
        Slope45      => slope_45,
        Concave      => concave,
        Convex       => convex,
        Slope22Small => slope_22_small,
        Slope22Big   => slope_22_big,
        Slope67Small => slope_67_small,
        Slope67Big   => slope_67_big,
        Half         => half,
    };
    Some(projection)
}

pub fn test_overlap(circle: &Circle, tile: &Tile) -> Option<(V2, Region)> {
    let delta = circle.pos - tile.pos;
    let r = circle.radius;

    let px = (tile.xw + r) - delta.x.abs();
    if px <= 0. {
        return None;
    }

    let py = (tile.yw + r) - delta.y.abs();
    if py <= 0. {
        return None;
    }

    Some((V2::new(px, py), Region::of(delta, tile)))
}

pub fn probe_circle_vs_tile(circle: &Circle, tile: &Tile) -> Option<Contact> {
    if !tile.is_solid() {
        return None;
    }

    let (pen, region) = test_overlap(circle, tile)?;
    let resolve = projection(tile.kind)?;
    resolve(pen, region, circle, tile)
}

pub fn collide_circle_vs_tile(body: &mut Body, tile: &Tile) -> CollisionResult {
    match probe_circle_vs_tile(&body.circle, tile) {
        Some(contact) => {
            body.report_collision_vs_world(contact.push, contact.normal);
            contact.result
        }

        None => CollisionResult::None
    }
}
