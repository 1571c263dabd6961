
use {
    crate::math::*,
};

pub const DEFAULT_DRAG:          f32 = 1.;
pub const DEFAULT_FRICTION:      f32 = 0.05;
pub const DEFAULT_BOUNCE:        f32 = 0.3;
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.;
pub const DEFAULT_MAX_SPEED:     f32 = 8.;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub drag:          f32,
    pub friction:      f32,
    pub bounce:        f32,
    pub gravity_scale: f32,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            drag:          DEFAULT_DRAG,
            friction:      DEFAULT_FRICTION,
            bounce:        DEFAULT_BOUNCE,
            gravity_scale: DEFAULT_GRAVITY_SCALE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Touching {
    pub up:    bool,
    pub down:  bool,
    pub left:  bool,
    pub right: bool,
}

impl Touching {
    pub fn none(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    // only exact axis normals count as touching a side
    fn mark(&mut self, normal: V2) {
        if      normal.x ==  1. { self.left  = true; }
        else if normal.x == -1. { self.right = true; }

        if      normal.y ==  1. { self.up    = true; }
        else if normal.y == -1. { self.down  = true; }
    }
}

// position Verlet: velocity is pos - old_pos
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub pos:      P2,
    pub old_pos:  P2,
    pub radius:   f32,
    pub velocity: V2,
}

impl Circle {
    pub fn new(pos: P2, radius: f32) -> Circle {
        Circle { pos, old_pos: pos, radius, velocity: V2::zeros() }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new_centered(self.pos, V2::new(self.radius, self.radius))
    }

    pub fn integrate(&mut self, material: &Material, gravity: f32) {
        let prev = self.pos;
        let drag = material.drag;

        self.pos.x += drag * self.pos.x - drag * self.old_pos.x;
        self.pos.y += drag * self.pos.y - drag * self.old_pos.y
                    + gravity * material.gravity_scale;

        self.velocity = self.pos - prev;
        self.old_pos = prev;
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub circle:               Circle,
    pub material:             Material,
    pub touching:             Touching,
    pub was_touching:         Touching,
    pub collide_world_bounds: bool,
    pub max_speed:            f32,
}

impl Body {
    pub fn new(pos: P2, radius: f32) -> Body {
        Body {
            circle:               Circle::new(pos, radius),
            material:             Material::default(),
            touching:             Touching::default(),
            was_touching:         Touching::default(),
            collide_world_bounds: true,
            max_speed:            DEFAULT_MAX_SPEED,
        }
    }

    pub fn with_material(mut self, material: Material) -> Body {
        self.material = material;
        self
    }

    pub fn pos(&self) -> P2 {
        self.circle.pos
    }

    pub fn pre_update(&mut self, gravity: f32, bounds: Rect) {
        self.was_touching = self.touching;
        self.touching = Touching::default();

        self.circle.integrate(&self.material, gravity);

        if self.collide_world_bounds {
            self.collide_world_bounds(bounds);
        }
    }

    // normal must be unit length
    pub fn report_collision_vs_world(&mut self, push: V2, normal: V2) {
        let Circle { pos, old_pos, .. } = &mut self.circle;

        let vel = *pos - *old_pos;

        let dp = vel.dot(&normal);
        let n  = dp * normal;
        let t  = vel - n;

        // only respond while moving into the surface
        let (bounce, friction) = if dp < 0. {
            self.touching.mark(normal);
            (n * (1. + self.material.bounce), t * self.material.friction)
        }
        else {
            (V2::zeros(), V2::zeros())
        };

        *pos += push;
        *old_pos += push + bounce + friction;

        log::trace!("contact push={:?} normal={:?} into={}", push, normal, dp < 0.);
    }

    pub fn collide_world_bounds(&mut self, bounds: Rect) {
        let pos = self.circle.pos;
        let r = self.circle.radius;

        let dx = bounds.mins.x - (pos.x - r);
        if 0. < dx {
            self.report_collision_vs_world(V2::new(dx, 0.), V2::new(1., 0.));
        }
        else {
            let dx = (pos.x + r) - bounds.maxs.x;
            if 0. < dx {
                self.report_collision_vs_world(V2::new(-dx, 0.), V2::new(-1., 0.));
            }
        }

        let dy = bounds.mins.y - (pos.y - r);
        if 0. < dy {
            self.report_collision_vs_world(V2::new(0., dy), V2::new(0., 1.));
        }
        else {
            let dy = (pos.y + r) - bounds.maxs.y;
            if 0. < dy {
                self.report_collision_vs_world(V2::new(0., -dy), V2::new(0., -1.));
            }
        }
    }

    pub fn set_zero_velocity(&mut self) {
        self.circle.old_pos = self.circle.pos;
    }

    pub fn reset(&mut self, pos: P2) {
        self.circle.pos = pos;
        self.set_zero_velocity();
        self.circle.velocity = V2::zeros();
    }

    // first step resting on something after being airborne
    pub fn landed(&self) -> bool {
        self.touching.down && !self.was_touching.down
    }

    pub fn delta(&self) -> V2 {
        self.circle.pos - self.circle.old_pos
    }

    pub fn speed(&self) -> f32 {
        self.circle.velocity.norm()
    }

    pub fn angle(&self) -> f32 {
        self.circle.velocity.y.atan2(self.circle.velocity.x)
    }

    fn nudge(&mut self, step: V2) {
        let max = self.max_speed;
        let d = self.delta() + step;
        let clamped = V2::new(d.x.max(-max).min(max), d.y.max(-max).min(max));

        let moved = V2::new(
            if step.x != 0. { clamped.x } else { d.x },
            if step.y != 0. { clamped.y } else { d.y },
        );
        self.circle.pos = self.circle.old_pos + moved;
    }

    pub fn move_left(&mut self, speed: f32, dt: f32) {
        self.nudge(V2::new(-speed * dt, 0.));
    }

    pub fn move_right(&mut self, speed: f32, dt: f32) {
        self.nudge(V2::new(speed * dt, 0.));
    }

    pub fn move_up(&mut self, speed: f32, dt: f32) {
        self.nudge(V2::new(0., -speed * dt));
    }

    pub fn move_down(&mut self, speed: f32, dt: f32) {
        self.nudge(V2::new(0., speed * dt));
    }

    pub fn move_to(&mut self, speed: f32, angle: f32, dt: f32) {
        let magnitude = speed * dt;
        let angle = angle.to_radians();
        self.circle.pos = self.circle.old_pos + magnitude * V2::new(angle.cos(), angle.sin());
    }

    pub fn move_from(&mut self, speed: f32, angle: f32, dt: f32) {
        self.move_to(-speed, angle, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: P2, b: P2) -> bool {
        (a - b).norm() < 0.0001
    }

    #[test]
    fn test_integrate_applies_gravity_and_drag() {
        let mut circle = Circle::new(P2::new(10., 10.), 4.);
        circle.old_pos = P2::new(9., 10.);

        let material = Material { drag: 0.5, ..Material::default() };
        circle.integrate(&material, 0.2);

        assert!(near(circle.pos, P2::new(10.5, 10.2)));
        assert!(near(circle.old_pos, P2::new(10., 10.)));
        assert!((circle.velocity - V2::new(0.5, 0.2)).norm() < 0.0001);
    }

    #[test]
    fn test_bounce_against_floor() {
        let mut body = Body::new(P2::new(0., 0.), 4.);
        body.circle.old_pos = P2::new(0., -2.);
        body.material.friction = 0.;

        body.report_collision_vs_world(V2::new(0., -1.), V2::new(0., -1.));

        assert!(near(body.circle.pos, P2::new(0., -1.)));
        assert!(near(body.circle.old_pos, P2::new(0., -0.4)));
        // next step moves up at bounce * incoming speed
        assert!((body.delta() - V2::new(0., -0.6)).norm() < 0.0001);
        assert!(body.touching.down);
        assert!(!body.touching.up && !body.touching.left && !body.touching.right);
    }

    #[test]
    fn test_friction_scales_tangent() {
        let mut body = Body::new(P2::new(0., 0.), 4.);
        body.circle.old_pos = P2::new(-2., -1.);
        body.material = Material { friction: 0.5, bounce: 0., ..Material::default() };

        body.report_collision_vs_world(V2::zeros(), V2::new(0., -1.));

        // normal component cancelled, half the tangential speed removed
        assert!((body.delta() - V2::new(1., 0.)).norm() < 0.0001);
    }

    #[test]
    fn test_moving_away_only_pushes() {
        let mut body = Body::new(P2::new(0., 0.), 4.);
        body.circle.old_pos = P2::new(0., 2.);

        body.report_collision_vs_world(V2::new(0., -1.), V2::new(0., -1.));

        assert!(near(body.circle.pos, P2::new(0., -1.)));
        assert!(near(body.circle.old_pos, P2::new(0., 1.)));
        assert!(body.touching.none());
    }

    #[test]
    fn test_world_bounds() {
        let bounds = Rect::new(P2::new(0., 0.), P2::new(100., 100.));
        let mut body = Body::new(P2::new(5., 95.), 10.);
        body.circle.old_pos = P2::new(7., 93.);

        body.collide_world_bounds(bounds);

        assert!(near(body.circle.pos, P2::new(10., 90.)));
        assert!(body.touching.left);
        assert!(body.touching.down);
        assert!(!body.touching.right && !body.touching.up);
    }

    #[test]
    fn test_pre_update_rolls_touching() {
        let bounds = Rect::new(P2::new(0., 0.), P2::new(100., 100.));
        let mut body = Body::new(P2::new(50., 50.), 4.);
        body.touching.down = true;

        body.pre_update(0.2, bounds);

        assert!(body.was_touching.down);
        assert!(body.touching.none());
        assert!((body.circle.pos.y - 50.2).abs() < 0.0001);
    }

    #[test]
    fn test_move_clamps_to_max_speed() {
        let mut body = Body::new(P2::new(0., 0.), 4.);
        body.move_right(10000., 1. / 60.);
        assert!((body.delta().x - DEFAULT_MAX_SPEED).abs() < 0.0001);

        body.move_left(60., 1. / 60.);
        assert!((body.delta().x - (DEFAULT_MAX_SPEED - 1.)).abs() < 0.0001);
    }

    #[test]
    fn test_move_to() {
        let mut body = Body::new(P2::new(0., 0.), 4.);
        body.move_to(60., 90., 1. / 60.);
        assert!(near(body.circle.pos, P2::new(0., 1.)));

        body.set_zero_velocity();
        assert_eq!(body.delta(), V2::zeros());
    }

    #[test]
    fn test_move_from() {
        let mut body = Body::new(P2::new(0., 0.), 4.);
        body.move_from(60., 0., 1. / 60.);
        assert!(near(body.circle.pos, P2::new(-1., 0.)));

        body.move_from(120., 90., 1. / 60.);
        assert!(near(body.circle.pos, P2::new(0., -2.)));
    }

    #[test]
    fn test_landed() {
        let bounds = Rect::new(P2::new(0., 0.), P2::new(100., 100.));
        let mut body = Body::new(P2::new(50., 95.), 4.);
        body.circle.old_pos = P2::new(50., 94.);
        body.material.bounce = 0.;

        body.pre_update(0.2, bounds);
        assert!(body.touching.down);
        assert!(body.landed());

        body.pre_update(0.2, bounds);
        assert!(body.touching.down);
        assert!(!body.landed());
    }
}
