
use {
    crate::math::*,
    std::{
        convert::TryFrom,
        f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI},
    },
    thiserror::Error,
};

const ARC_SEGMENTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("unknown tile id {0}")]
    UnknownId(u8),

    #[error("tile data has {got} cells, map needs {expected}")]
    DataSize { expected: usize, got: usize },
}

// the suffix gives the normal's signs, Pn being right and up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileId {
    Empty = 0,
    Full,
    Slope45Pn, Slope45Nn, Slope45Np, Slope45Pp,
    ConcavePn, ConcaveNn, ConcaveNp, ConcavePp,
    ConvexPn, ConvexNn, ConvexNp, ConvexPp,
    Slope22PnS, Slope22NnS, Slope22NpS, Slope22PpS,
    Slope22PnB, Slope22NnB, Slope22NpB, Slope22PpB,
    Slope67PnS, Slope67NnS, Slope67NpS, Slope67PpS,
    Slope67PnB, Slope67NnB, Slope67NpB, Slope67PpB,
    HalfDown, HalfRight, HalfUp, HalfLeft,
}

impl TileId {
    pub const ALL: [TileId; 34] = {
        use TileId::*;
        [   Empty, Full,
            Slope45Pn, Slope45Nn, Slope45Np, Slope45Pp,
            ConcavePn, ConcaveNn, ConcaveNp, ConcavePp,
            ConvexPn, ConvexNn, ConvexNp, ConvexPp,
            Slope22PnS, Slope22NnS, Slope22NpS, Slope22PpS,
            Slope22PnB, Slope22NnB, Slope22NpB, Slope22PpB,
            Slope67PnS, Slope67NnS, Slope67NpS, Slope67PpS,
            Slope67PnB, Slope67NnB, Slope67NpB, Slope67PpB,
            HalfDown, HalfRight, HalfUp, HalfLeft,
        ]
    };

    pub fn kind(self) -> TileKind {
        use TileKind::*;
        match self as u8 {
            0        => Empty,
            1        => Full,
            2 ..= 5  => Slope45,
            6 ..= 9  => Concave,
            10 ..= 13 => Convex,
            14 ..= 17 => Slope22Small,
            18 ..= 21 => Slope22Big,
            22 ..= 25 => Slope67Small,
            26 ..= 29 => Slope67Big,
            _        => Half,
        }
    }

    pub fn signs(self) -> (f32, f32) {
        match self.kind() {
            TileKind::Empty | TileKind::Full => (0., 0.),

            TileKind::Half => match self {
                TileId::HalfDown  => ( 0., -1.),
                TileId::HalfRight => (-1.,  0.),
                TileId::HalfUp    => ( 0.,  1.),
                _                 => ( 1.,  0.),
            },

            // every sloped family lists its four mirrors as pn, nn, np, pp
            _ => match (self as u8 - 2) % 4 {
                0 => ( 1., -1.),
                1 => (-1., -1.),
                2 => (-1.,  1.),
                _ => ( 1.,  1.),
            },
        }
    }

    pub fn slope(self) -> V2 {
        let (signx, signy) = self.signs();
        let slen = 5f32.sqrt();

        match self.kind() {
            TileKind::Slope45 => V2::new(signx, signy) * FRAC_1_SQRT_2,

            TileKind::Slope22Small
            | TileKind::Slope22Big => V2::new(signx, 2. * signy) / slen,

            TileKind::Slope67Small
            | TileKind::Slope67Big => V2::new(2. * signx, signy) / slen,

            TileKind::Half => V2::new(signx, signy),

            _ => V2::zeros(),
        }
    }
}

impl TryFrom<u8> for TileId {
    type Error = TileError;

    fn try_from(id: u8) -> Result<TileId, TileError> {
        TileId::ALL.get(id as usize)
            .copied()
            .ok_or(TileError::UnknownId(id))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Empty,
    Full,
    Slope45,
    Concave,
    Convex,
    Slope22Small,
    Slope22Big,
    Slope67Small,
    Slope67Big,
    Half,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub pos:   P2,
    pub xw:    f32,
    pub yw:    f32,
    pub id:    TileId,
    pub kind:  TileKind,
    pub signx: f32,
    pub signy: f32,
    pub slope: V2,
}

impl Tile {
    pub fn new(pos: P2, width: f32, height: f32, id: TileId) -> Tile {
        // sloped shapes only make sense in square cells
        let height = match id.kind() {
            TileKind::Empty | TileKind::Full | TileKind::Half => height,
            _                                                 => width,
        };

        let mut tile = Tile {
            pos,
            xw:    (width  * 0.5).abs(),
            yw:    (height * 0.5).abs(),
            id:    TileId::Empty,
            kind:  TileKind::Empty,
            signx: 0.,
            signy: 0.,
            slope: V2::zeros(),
        };
        tile.set_id(id);
        tile
    }

    pub fn set_id(&mut self, id: TileId) {
        let (signx, signy) = id.signs();
        self.id    = id;
        self.kind  = id.kind();
        self.signx = signx;
        self.signy = signy;
        self.slope = id.slope();
    }

    pub fn clear(&mut self) {
        self.set_id(TileId::Empty);
    }

    pub fn is_solid(&self) -> bool {
        self.id != TileId::Empty
    }

    pub fn half(&self) -> V2 {
        V2::new(self.xw, self.yw)
    }

    pub fn rect(&self) -> Rect {
        Rect::new_centered(self.pos, self.half())
    }

    // zero components pick the middle of that axis
    pub fn corner(&self, h: f32, v: f32) -> P2 {
        P2::new(self.pos.x + h * self.xw, self.pos.y + v * self.yw)
    }

    pub fn outline(&self) -> Vec<P2> {
        let (xw, yw) = (self.xw, self.yw);

        // built for signs (1, 1) and mirrored into place afterwards
        let local: Vec<V2> = match self.kind {
            TileKind::Empty => Vec::new(),

            TileKind::Full => vec![
                V2::new(-xw, -yw), V2::new(xw, -yw), V2::new(xw, yw), V2::new(-xw, yw),
            ],

            TileKind::Slope45 => vec![
                V2::new(-xw, -yw), V2::new(xw, -yw), V2::new(-xw, yw),
            ],

            TileKind::Slope22Small => vec![
                V2::new(-xw, -yw), V2::new(xw, -yw), V2::new(-xw, 0.),
            ],

            TileKind::Slope22Big => vec![
                V2::new(-xw, -yw), V2::new(xw, -yw), V2::new(xw, 0.), V2::new(-xw, yw),
            ],

            TileKind::Slope67Small => vec![
                V2::new(-xw, -yw), V2::new(0., -yw), V2::new(-xw, yw),
            ],

            TileKind::Slope67Big => vec![
                V2::new(-xw, -yw), V2::new(xw, -yw), V2::new(0., yw), V2::new(-xw, yw),
            ],

            TileKind::Concave => {
                let center = V2::new(xw, yw);
                let mut points = vec![V2::new(-xw, -yw), V2::new(xw, -yw)];
                points.extend(arc(center, 2. * xw, -FRAC_PI_2, -PI).skip(1));
                points
            }

            TileKind::Convex => {
                let center = V2::new(-xw, -yw);
                let mut points = vec![V2::new(-xw, -yw)];
                points.extend(arc(center, 2. * xw, 0., FRAC_PI_2));
                points
            }

            TileKind::Half => {
                return half_outline(self);
            }
        };

        let (mx, my) = (mirror(self.signx), mirror(self.signy));
        let mut points: Vec<P2> = local.into_iter()
            .map(|p| self.pos + V2::new(p.x * mx, p.y * my))
            .collect();

        // mirroring an odd number of axes flips the winding
        if mx * my < 0. {
            points.reverse();
        }
        points
    }
}

fn mirror(sign: f32) -> f32 {
    if sign < 0. { -1. }
    else         {  1. }
}

fn arc(center: V2, radius: f32, from: f32, to: f32) -> impl Iterator<Item = V2> {
    (0 ..= ARC_SEGMENTS).map(move |i| {
        let t = from + (to - from) * (i as f32 / ARC_SEGMENTS as f32);
        center + radius * V2::new(t.cos(), t.sin())
    })
}

fn half_outline(tile: &Tile) -> Vec<P2> {
    let rect = tile.rect();
    let (lo, hi) = (rect.mins, rect.maxs);
    let mid = tile.pos;

    // solid half lies opposite the normal
    let (mins, maxs) = match (tile.signx as i32, tile.signy as i32) {
        (0, -1) => (P2::new(lo.x, mid.y), hi),
        (0,  _) => (lo, P2::new(hi.x, mid.y)),
        (-1, _) => (P2::new(mid.x, lo.y), hi),
        _       => (lo, P2::new(mid.x, hi.y)),
    };

    Rect::new(mins, maxs).vertices().to_vec()
}
