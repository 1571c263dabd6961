
use {
    crate::{
        body::{Body, Material},
        math::*,
    },
    rand::{Rng, SeedableRng},
    pcg_rand::Pcg32Basic,
};

const MIN_RADIUS: f32 = 4.;
const MAX_RADIUS: f32 = 14.;
const MAX_KICK:   f32 = 3.;
const KICK_CONE:  (f32, f32) = (-160., -20.);

pub struct Spawner {
    rng:  Pcg32Basic,
    area: Rect,
}

impl Spawner {
    pub fn new(seed: u64, area: Rect) -> Spawner {
        let rng = Pcg32Basic::seed_from_u64(seed);
        Spawner { rng, area }
    }

    fn material(&mut self) -> Material {
        let base = Material::default();
        match self.rng.gen::<f32>() {
            x if x < 0.6 => base,
            x if x < 0.8 => Material { bounce: 0.8, ..base },
            x if x < 0.9 => Material { friction: 0.3, bounce: 0.1, ..base },
            _            => Material { gravity_scale: 0.25, drag: 0.98, ..base },
        }
    }

    pub fn spawn(&mut self) -> Body {
        let radius = self.rng.gen_range(MIN_RADIUS, MAX_RADIUS);

        // keep the whole circle inside the spawn area
        let half = (0.5 * self.area.dims()).map(|w| w.min(radius));
        let x = lerp(self.area.mins.x + half.x, self.area.maxs.x - half.x, self.rng.gen());
        let y = lerp(self.area.mins.y + half.y, self.area.maxs.y - half.y, self.rng.gen());
        let pos = P2::new(x, y);

        // thrown upwards, speed in pixels per step
        let speed = self.rng.gen_range(0., MAX_KICK);
        let angle = self.rng.gen_range(KICK_CONE.0, KICK_CONE.1);

        let mut body = Body::new(pos, radius).with_material(self.material());
        body.move_to(speed, angle, 1.);

        log::debug!("spawned r={:.1} at {:?}, speed {:.2} at {:.0} degrees", radius, pos, speed, angle);
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(P2::new(32., 32.), P2::new(320., 96.))
    }

    #[test]
    fn test_spawns_inside_area() {
        let mut spawner = Spawner::new(7, area());

        for _ in 0 .. 200 {
            let body = spawner.spawn();
            let r = body.circle.radius;
            assert!(r >= MIN_RADIUS && r < MAX_RADIUS);

            let bounds = Rect::new_centered(body.circle.old_pos, V2::new(r, r));
            assert!(bounds.mins.x >= 32. - 0.001 && bounds.maxs.x <= 320. + 0.001, "{:?}", bounds);
            assert!(bounds.mins.y >= 32. - 0.001 && bounds.maxs.y <= 96. + 0.001, "{:?}", bounds);

            // thrown upwards or not at all
            assert!(body.delta().y <= 0.);
            assert!(body.delta().norm() < MAX_KICK + 0.001);
        }
    }

    #[test]
    fn test_same_seed_same_bodies() {
        let mut a = Spawner::new(1234, area());
        let mut b = Spawner::new(1234, area());

        for _ in 0 .. 10 {
            let (a, b) = (a.spawn(), b.spawn());
            assert_eq!(a.circle, b.circle);
            assert_eq!(a.material, b.material);
        }
    }
}
