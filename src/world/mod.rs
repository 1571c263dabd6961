
mod spawner;

pub use spawner::Spawner;

use {
    crate::{
        body::Body,
        collide::{collide_circle_vs_tile, CollisionResult},
        math::*,
        tilemap::TileMap,
    },
};

pub const DEFAULT_GRAVITY: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

pub struct World {
    pub gravity: f32,
    pub bounds:  Rect,
    pub map:     TileMap,
    bodies:      Vec<Body>,
}

impl World {
    pub fn new(map: TileMap) -> World {
        let bounds = map.rect();
        log::debug!("world bounds {:?}, gravity {}", bounds, DEFAULT_GRAVITY);

        World {
            gravity: DEFAULT_GRAVITY,
            bounds,
            map,
            bodies: Vec::new(),
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index), body))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn step(&mut self) {
        let World { gravity, bounds, map, bodies } = self;

        let mut contacts = 0;
        for body in bodies.iter_mut() {
            body.pre_update(*gravity, *bounds);

            for tile in map.tiles_overlapping(body.circle.bounds()) {
                if collide_circle_vs_tile(body, tile) != CollisionResult::None {
                    contacts += 1;
                }
            }
        }

        log::trace!("step: {} bodies, {} tile contacts", bodies.len(), contacts);
    }
}
