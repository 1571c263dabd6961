
pub mod rect;

pub use rect::Rect;

use {
    ggez::nalgebra as na,
};

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

pub type V2 = na::Vector2<f32>;
pub type P2 = na::Point2<f32>;

pub fn left(v: V2) -> V2 {
    V2::new(-v.y, v.x)
}

pub fn lerp_point(a: P2, b: P2, t: f32) -> P2 {
    P2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_perpendicular() {
        let v = V2::new(3., 1.);
        assert!(left(v).dot(&v).abs() < 0.00001);
        assert_eq!(left(left(v)), -v);
    }

    #[test]
    fn test_lerp_point() {
        let p = lerp_point(P2::new(0., 10.), P2::new(4., 20.), 0.25);
        assert!((p - P2::new(1., 12.5)).norm() < 0.00001);
    }
}
