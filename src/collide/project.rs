
use {
    super::{Contact, Region},
    crate::{
        body::Circle,
        math::*,
        tile::Tile,
    },
    std::f32::consts::FRAC_1_SQRT_2,
};

pub type Projection = fn(V2, Region, &Circle, &Tile) -> Option<Contact>;

fn unit_or(v: V2, fallback: V2) -> V2 {
    let len = v.norm();
    if len > 0. { v / len }
    else        { fallback }
}

// smallest axis push out of the cell, signed away from the tile center
fn axis_push(pen: V2, circle: &Circle, tile: &Tile) -> (V2, f32) {
    let delta = circle.pos - tile.pos;
    if pen.x < pen.y {
        let x = if delta.x < 0. { -pen.x } else { pen.x };
        (V2::new(x, 0.), pen.x)
    }
    else {
        let y = if delta.y < 0. { -pen.y } else { pen.y };
        (V2::new(0., y), pen.y)
    }
}

fn axis(pen: V2, circle: &Circle, tile: &Tile) -> Contact {
    let (push, len) = axis_push(pen, circle, tile);
    Contact::axis(push, push / len)
}

// take whichever is shorter: the axis push or `depth` along `normal`
fn axis_or(pen: V2, circle: &Circle, tile: &Tile, depth: f32, normal: V2) -> Contact {
    let (push, len) = axis_push(pen, circle, tile);
    if len < depth {
        Contact::axis(push, push / len)
    }
    else {
        Contact::other(normal * depth, normal)
    }
}

fn face_x(pen: V2, region: Region) -> Contact {
    let h = region.hf();
    Contact::axis(V2::new(pen.x * h, 0.), V2::new(h, 0.))
}

fn face_y(pen: V2, region: Region) -> Contact {
    let v = region.vf();
    Contact::axis(V2::new(0., pen.y * v), V2::new(0., v))
}

// offset runs from the point to the circle's center
fn vertex(circle: &Circle, offset: V2, fallback: V2) -> Option<Contact> {
    let depth = circle.radius - offset.norm();
    if 0. < depth {
        let normal = unit_or(offset, fallback);
        Some(Contact::other(normal * depth, normal))
    }
    else {
        None
    }
}

fn corner(circle: &Circle, tile: &Tile, region: Region) -> Option<Contact> {
    let offset = circle.pos - tile.corner(region.hf(), region.vf());
    vertex(circle, offset, region.outward())
}

fn slope_face(circle: &Circle, tile: &Tile, offset: V2) -> Option<Contact> {
    let depth = circle.radius - offset.dot(&tile.slope).abs();
    if 0. < depth {
        Some(Contact::other(tile.slope * depth, tile.slope))
    }
    else {
        None
    }
}

// how far the innermost point of the circle sits behind the slope plane
fn slope_depth(circle: &Circle, tile: &Tile, on_plane: P2) -> Option<f32> {
    let inner = (circle.pos - tile.slope * circle.radius) - on_plane;
    let dp = inner.dot(&tile.slope);
    if dp < 0. { Some(-dp) }
    else       { None }
}

// which side of the slope normal through a vertex the offset lies on,
// with the tile's mirroring divided out
fn voronoi(offset: V2, tile: &Tile) -> f32 {
    offset.dot(&left(tile.slope)) * tile.signx * tile.signy
}

// unit diagonal along the tile's normal signs
fn diagonal(tile: &Tile) -> V2 {
    V2::new(tile.signx, tile.signy) * FRAC_1_SQRT_2
}

fn same_diagonal(region: Region, tile: &Tile) -> bool {
    0. < region.hf() * tile.signx + region.vf() * tile.signy
}

pub fn full(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    match (region.h, region.v) {
        (0, 0) => Some(axis(pen, circle, tile)),
        (0, _) => Some(face_y(pen, region)),
        (_, 0) => Some(face_x(pen, region)),
        _      => corner(circle, tile, region),
    }
}

pub fn slope_45(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);

    match (region.h, region.v) {
        (0, 0) => slope_depth(circle, tile, tile.pos)
            .map(|depth| axis_or(pen, circle, tile, depth, tile.slope)),

        (0, _) if signy * v < 0. => Some(face_y(pen, region)),
        (0, _) => {
            let offset = circle.pos - tile.corner(-signx, v);
            if 0. < voronoi(offset, tile) {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        (_, 0) if signx * h < 0. => Some(face_x(pen, region)),
        (_, 0) => {
            let offset = circle.pos - tile.corner(h, -signy);
            if voronoi(offset, tile) < 0. {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        _ if same_diagonal(region, tile) => None,
        _ => corner(circle, tile, region),
    }
}

pub fn concave(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);

    match (region.h, region.v) {
        (0, 0) => {
            // toward the center of the circle carved out of the tile
            let offset = tile.corner(signx, signy) - circle.pos;
            let len = offset.norm();
            let depth = (len + circle.radius) - 2. * tile.xw;
            if 0. < depth {
                Some(axis_or(pen, circle, tile, depth, unit_or(offset, diagonal(tile))))
            }
            else {
                None
            }
        }

        (0, _) if signy * v < 0. => Some(face_y(pen, region)),
        (0, _) => {
            let offset = circle.pos - tile.corner(-signx, v);
            vertex(circle, offset, V2::new(0., v))
        }

        (_, 0) if signx * h < 0. => Some(face_x(pen, region)),
        (_, 0) => {
            let offset = circle.pos - tile.corner(h, -signy);
            vertex(circle, offset, V2::new(h, 0.))
        }

        _ if same_diagonal(region, tile) => None,
        _ => corner(circle, tile, region),
    }
}

pub fn convex(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);

    // the surface is a quarter circle around the corner opposite the normal
    let offset = circle.pos - tile.corner(-signx, -signy);
    let depth = (2. * tile.xw + circle.radius) - offset.norm();
    let normal = unit_or(offset, diagonal(tile));

    let arc = || if 0. < depth {
        Some(Contact::other(normal * depth, normal))
    }
    else {
        None
    };

    match (region.h, region.v) {
        (0, 0) if 0. < depth => Some(axis_or(pen, circle, tile, depth, normal)),
        (0, 0) => None,

        (0, _) if signy * v < 0. => Some(face_y(pen, region)),
        (0, _) => arc(),

        (_, 0) if signx * h < 0. => Some(face_x(pen, region)),
        (_, 0) => arc(),

        _ if same_diagonal(region, tile) => arc(),
        _ => corner(circle, tile, region),
    }
}

pub fn half(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);
    let celldp = h * signx + v * signy;

    if 0. < celldp {
        return None;
    }

    match (region.h, region.v) {
        (0, 0) => slope_depth(circle, tile, tile.pos)
            .map(|depth| axis_or(pen, circle, tile, depth, tile.slope)),

        // above or below a half that faces sideways: either its solid face
        // or the end of its dividing edge
        (0, _) if celldp == 0. => {
            let dx = circle.pos.x - tile.pos.x;
            if dx * signx < 0. {
                Some(face_y(pen, region))
            }
            else {
                let offset = V2::new(dx, circle.pos.y - (tile.pos.y + v * tile.yw));
                vertex(circle, offset, unit_or(V2::new(signx, v), V2::new(0., v)))
            }
        }
        (0, _) => Some(face_y(pen, region)),

        (_, 0) if celldp == 0. => {
            let dy = circle.pos.y - tile.pos.y;
            if dy * signy < 0. {
                Some(face_x(pen, region))
            }
            else {
                let offset = V2::new(circle.pos.x - (tile.pos.x + h * tile.xw), dy);
                vertex(circle, offset, unit_or(V2::new(h, signy), V2::new(h, 0.)))
            }
        }
        (_, 0) => Some(face_x(pen, region)),

        _ => corner(circle, tile, region),
    }
}

pub fn slope_22_small(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);

    if 0. < signy * v {
        return None;
    }

    match (region.h, region.v) {
        (0, 0) => {
            let offset = circle.pos - tile.corner(-signx, 0.);
            if 0. < voronoi(offset, tile) {
                vertex(circle, offset, tile.slope)
            }
            else {
                slope_depth(circle, tile, tile.corner(-signx, 0.))
                    .map(|depth| axis_or(pen, circle, tile, depth, tile.slope))
            }
        }

        (0, _) => Some(face_y(pen, region)),

        // beside the low end of the slope
        (_, 0) if signx * h < 0. => {
            let offset = circle.pos - tile.corner(-signx, 0.);
            if offset.y * signy < 0. {
                Some(face_x(pen, region))
            }
            else {
                vertex(circle, offset, region.outward())
            }
        }
        (_, 0) => {
            let offset = circle.pos - tile.corner(h, -signy);
            if voronoi(offset, tile) < 0. {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        _ => corner(circle, tile, region),
    }
}

pub fn slope_22_big(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);
    let on_plane = tile.corner(-signx, signy);

    match (region.h, region.v) {
        (0, 0) => slope_depth(circle, tile, on_plane)
            .map(|depth| axis_or(pen, circle, tile, depth, tile.slope)),

        (0, _) if signy * v < 0. => Some(face_y(pen, region)),
        (0, _) => {
            let offset = circle.pos - on_plane;
            if 0. < voronoi(offset, tile) {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        (_, 0) if signx * h < 0. => Some(face_x(pen, region)),
        (_, 0) => {
            let offset = circle.pos - tile.corner(signx, 0.);
            if offset.y * signy < 0. {
                Some(face_x(pen, region))
            }
            else if voronoi(offset, tile) < 0. {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        _ if same_diagonal(region, tile) => slope_depth(circle, tile, on_plane)
            .map(|depth| Contact::other(tile.slope * depth, tile.slope)),
        _ => corner(circle, tile, region),
    }
}

pub fn slope_67_small(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);

    if 0. < signx * h {
        return None;
    }

    match (region.h, region.v) {
        (0, 0) => {
            let offset = circle.pos - tile.corner(0., -signy);
            if voronoi(offset, tile) < 0. {
                vertex(circle, offset, tile.slope)
            }
            else {
                slope_depth(circle, tile, tile.corner(0., -signy))
                    .map(|depth| axis_or(pen, circle, tile, depth, tile.slope))
            }
        }

        // above or below the low end of the slope
        (0, _) if signy * v < 0. => {
            let offset = circle.pos - tile.corner(0., -signy);
            if offset.x * signx < 0. {
                Some(face_y(pen, region))
            }
            else {
                vertex(circle, offset, region.outward())
            }
        }
        (0, _) => {
            let offset = circle.pos - tile.corner(-signx, v);
            if 0. < voronoi(offset, tile) {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        (_, 0) => Some(face_x(pen, region)),

        _ => corner(circle, tile, region),
    }
}

pub fn slope_67_big(pen: V2, region: Region, circle: &Circle, tile: &Tile) -> Option<Contact> {
    let (h, v) = (region.hf(), region.vf());
    let (signx, signy) = (tile.signx, tile.signy);
    let on_plane = tile.corner(signx, -signy);

    match (region.h, region.v) {
        (0, 0) => slope_depth(circle, tile, on_plane)
            .map(|depth| axis_or(pen, circle, tile, depth, tile.slope)),

        (0, _) if signy * v < 0. => Some(face_y(pen, region)),
        (0, _) => {
            let offset = circle.pos - tile.corner(0., signy);
            if offset.x * signx < 0. {
                Some(face_y(pen, region))
            }
            else if 0. < voronoi(offset, tile) {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        (_, 0) if signx * h < 0. => Some(face_x(pen, region)),
        (_, 0) => {
            let offset = circle.pos - on_plane;
            if voronoi(offset, tile) < 0. {
                vertex(circle, offset, region.outward())
            }
            else {
                slope_face(circle, tile, offset)
            }
        }

        _ if same_diagonal(region, tile) => slope_depth(circle, tile, on_plane)
            .map(|depth| Contact::other(tile.slope * depth, tile.slope)),
        _ => corner(circle, tile, region),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            collide::{test_overlap, CollisionResult},
            tile::TileId,
        },
        std::f32::consts::FRAC_1_SQRT_2,
    };

    fn tile(id: TileId) -> Tile {
        Tile::new(P2::new(16., 16.), 32., 32., id)
    }

    fn probe(project: Projection, id: TileId, x: f32, y: f32, radius: f32) -> Option<Contact> {
        let t = tile(id);
        let circle = Circle::new(P2::new(x, y), radius);
        let (pen, region) = test_overlap(&circle, &t)?;
        project(pen, region, &circle, &t)
    }

    fn approx(a: V2, b: V2) -> bool {
        (a - b).norm() < 0.001
    }

    #[test]
    fn test_corner_fallback_normal() {
        let t = tile(TileId::Full);
        let circle = Circle::new(P2::new(32., 32.), 5.);

        let contact = full(V2::new(5., 5.), Region::new(1, 1), &circle, &t).unwrap();

        let n = V2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        assert_eq!(contact.result, CollisionResult::Other);
        assert!(approx(contact.normal, n));
        assert!(approx(contact.push, n * 5.));
    }

    #[test]
    fn test_slope_45_vertex_fallback() {
        // center exactly on the solid corner of a slope facing away from it
        let t = tile(TileId::Slope45Nn);
        let circle = Circle::new(P2::new(32., 32.), 5.);

        let contact = slope_45(V2::new(5., 5.), Region::new(1, 1), &circle, &t).unwrap();

        assert_eq!(contact.result, CollisionResult::Other);
        assert!(approx(contact.normal, V2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)));
    }

    #[test]
    fn test_slope_45_mirrors() {
        let a = probe(slope_45, TileId::Slope45Pp, 20., 20., 8.).unwrap();
        let b = probe(slope_45, TileId::Slope45Np, 12., 20., 8.).unwrap();

        assert_eq!(a.result, CollisionResult::Other);
        assert_eq!(b.result, CollisionResult::Other);
        assert!((a.push.norm() - 2.343).abs() < 0.001);
        assert!(approx(b.push, V2::new(-a.push.x, a.push.y)));
        assert!(approx(a.normal, V2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)));
    }

    #[test]
    fn test_slope_45_far_diagonal() {
        // across the slope normal's diagonal the solid corner is out of reach
        assert_eq!(probe(slope_45, TileId::Slope45Pp, 35., 35., 8.), None);
        assert!(probe(slope_45, TileId::Slope45Nn, 35., 35., 8.).is_some());
    }

    #[test]
    fn test_slope_45_face_behind_slope() {
        // directly above a tile whose slope faces down: the flat top
        let contact = probe(slope_45, TileId::Slope45Pp, 16., -4., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Axis);
        assert!(approx(contact.push, V2::new(0., -4.)));
        assert!(approx(contact.normal, V2::new(0., -1.)));
    }

    #[test]
    fn test_concave_current_cell() {
        let contact = probe(concave, TileId::ConcavePp, 10., 10., 8.).unwrap();

        assert_eq!(contact.result, CollisionResult::Other);
        assert!((contact.push.norm() - (22. * 2f32.sqrt() - 24.)).abs() < 0.001);
        assert!(approx(contact.normal, V2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)));
    }

    #[test]
    fn test_concave_inside_the_hollow() {
        // well inside the carved circle nothing touches
        assert_eq!(probe(concave, TileId::ConcavePp, 24., 24., 4.), None);
    }

    #[test]
    fn test_arc_center_fallback_normal() {
        let n = V2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);

        // too big for the hollow and centred on the carved circle's center
        let contact = probe(concave, TileId::ConcavePp, 32., 32., 40.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!((contact.normal.norm() - 1.).abs() < 0.0001);
        assert!(approx(contact.normal, n));
        assert!(approx(contact.push, n * 8.));

        // centred on the convex arc's center
        let t = tile(TileId::ConvexNn);
        let circle = Circle::new(P2::new(32., 32.), 8.);
        let contact = convex(V2::new(100., 100.), Region::new(0, 0), &circle, &t).unwrap();
        assert!((contact.normal.norm() - 1.).abs() < 0.0001);
        assert!(approx(contact.normal, -n));
        assert!(approx(contact.push, -n * 40.));
    }

    #[test]
    fn test_convex_surface() {
        let contact = probe(convex, TileId::ConvexPp, 28., 28., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);

        let pos = P2::new(28., 28.) + contact.push;
        assert!(((pos - P2::new(0., 0.)).norm() - 40.).abs() < 0.001);
    }

    #[test]
    fn test_convex_neighbour_along_normal() {
        // right of the tile the arc is all that can be touched
        let contact = probe(convex, TileId::ConvexPp, 36., 4., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);

        let pos = P2::new(36., 4.) + contact.push;
        assert!(((pos - P2::new(0., 0.)).norm() - 40.).abs() < 0.001);
    }

    #[test]
    fn test_half_tiles() {
        let contact = probe(half, TileId::HalfDown, 16., 12., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!(approx(contact.push, V2::new(0., -4.)));
        assert!(approx(contact.normal, V2::new(0., -1.)));

        // the neighbour above faces the empty half
        assert_eq!(probe(half, TileId::HalfDown, 16., -4., 8.), None);

        // below the solid half is a plain face
        let contact = probe(half, TileId::HalfDown, 16., 38., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Axis);
        assert!(approx(contact.push, V2::new(0., 2.)));
    }

    #[test]
    fn test_half_edge_end() {
        // above a left half, right of its dividing edge: the edge's end point
        let contact = probe(half, TileId::HalfLeft, 19., -3., 5.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!(approx(contact.normal, V2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)));
        assert!((contact.push.norm() - (5. - 18f32.sqrt())).abs() < 0.001);

        let contact = probe(half, TileId::HalfLeft, 18., -2., 5.).unwrap();
        assert!((contact.push.norm() - (5. - 8f32.sqrt())).abs() < 0.001);

        // over the solid half it's the flat top
        let contact = probe(half, TileId::HalfLeft, 10., -3., 5.).unwrap();
        assert_eq!(contact.result, CollisionResult::Axis);
        assert!(approx(contact.push, V2::new(0., -2.)));
    }

    #[test]
    fn test_slope_22_small() {
        let contact = probe(slope_22_small, TileId::Slope22PpS, 24., 6., 4.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!((contact.push.norm() - (4. - 4. / 5f32.sqrt())).abs() < 0.001);
        assert!(approx(contact.normal, V2::new(1., 2.) / 5f32.sqrt()));

        // the cell the normal points into can't reach the slope
        assert_eq!(probe(slope_22_small, TileId::Slope22PpS, 16., 36., 8.), None);
    }

    #[test]
    fn test_slope_22_big() {
        let contact = probe(slope_22_big, TileId::Slope22NnB, 12., 12., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!((contact.push.norm() - (8. + 4. / 5f32.sqrt())).abs() < 0.001);
        assert!(approx(contact.normal, V2::new(-1., -2.) / 5f32.sqrt()));
    }

    #[test]
    fn test_slope_67_small() {
        let contact = probe(slope_67_small, TileId::Slope67PnS, 12., 20., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!(approx(contact.normal, V2::new(2., -1.) / 5f32.sqrt()));

        let pos = P2::new(12., 20.) + contact.push;
        let dist = (pos - P2::new(16., 32.)).dot(&contact.normal);
        assert!((dist - 8.).abs() < 0.001);

        // the cell the normal points into can't reach the slope
        assert_eq!(probe(slope_67_small, TileId::Slope67PnS, 38., 16., 8.), None);
    }

    #[test]
    fn test_slope_67_big() {
        let contact = probe(slope_67_big, TileId::Slope67NpB, 8., 12., 8.).unwrap();
        assert_eq!(contact.result, CollisionResult::Other);
        assert!((contact.push.norm() - (8. + 4. / 5f32.sqrt())).abs() < 0.001);
        assert!(approx(contact.normal, V2::new(-2., 1.) / 5f32.sqrt()));
    }
}
