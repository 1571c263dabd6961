
use {
    crate::{
        math::*,
        tile::{Tile, TileError, TileId},
    },
    std::{
        convert::TryFrom,
        ops::Range,
    },
};

// origin at the top left corner of cell (0, 0)
#[derive(Clone, Debug)]
pub struct TileMap {
    width:     usize,
    height:    usize,
    tile_size: f32,
    cells:     Vec<Tile>,
}

fn cell_center(x: usize, y: usize, tile_size: f32) -> P2 {
    P2::new((x as f32 + 0.5) * tile_size, (y as f32 + 0.5) * tile_size)
}

// cells touched by [lo, hi] along one axis
fn cell_span(lo: f32, hi: f32, tile_size: f32, count: usize) -> Range<usize> {
    let first = (lo / tile_size).floor().max(0.) as usize;
    let end   = ((hi / tile_size).floor() + 1.).max(0.) as usize;
    first.min(count) .. end.min(count)
}

impl TileMap {
    pub fn new(width: usize, height: usize, tile_size: f32) -> TileMap {
        let cells = (0 .. height)
            .flat_map(|y| (0 .. width).map(move |x| (x, y)))
            .map(|(x, y)| Tile::new(cell_center(x, y, tile_size), tile_size, tile_size, TileId::Empty))
            .collect();

        TileMap { width, height, tile_size, cells }
    }

    // indices past the end of the slope map stay empty
    pub fn from_indices(
        width:     usize,
        height:    usize,
        tile_size: f32,
        data:      &[u32],
        slope_map: &[u8],
    ) -> Result<TileMap, TileError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(TileError::DataSize { expected, got: data.len() });
        }

        let mut map = TileMap::new(width, height, tile_size);
        for (cell, &index) in map.cells.iter_mut().zip(data) {
            let id = match slope_map.get(index as usize) {
                Some(&id) => TileId::try_from(id)?,
                None      => TileId::Empty,
            };
            cell.set_id(id);
        }

        log::info!(
            "converted {}x{} tile map, {} solid tiles",
            width, height,
            map.tiles().filter(|tile| tile.is_solid()).count()
        );

        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rect(&self) -> Rect {
        let dims = V2::new(self.width as f32, self.height as f32) * self.tile_size;
        Rect::new_with_dims(P2::origin(), dims)
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height { Some(y * self.width + x) }
        else                                 { None }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        let i = self.index(x, y)?;
        self.cells.get_mut(i)
    }

    pub fn set(&mut self, x: usize, y: usize, id: TileId) {
        match self.index(x, y) {
            Some(i) => self.cells[i].set_id(id),
            None    => log::warn!("tile ({}, {}) is outside the {}x{} map", x, y, self.width, self.height),
        }
    }

    pub fn cell_at(&self, p: P2) -> Option<(usize, usize)> {
        if !self.rect().contains(p) {
            return None;
        }

        let x = (p.x / self.tile_size) as usize;
        let y = (p.y / self.tile_size) as usize;
        self.index(x, y).map(|_| (x, y))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter()
    }

    pub fn tiles_overlapping<'a>(&'a self, rect: Rect) -> impl Iterator<Item = &'a Tile> + 'a {
        let xs = cell_span(rect.mins.x, rect.maxs.x, self.tile_size, self.width);
        let ys = cell_span(rect.mins.y, rect.maxs.y, self.tile_size, self.height);

        ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
            .map(move |(x, y)| &self.cells[y * self.width + x])
            .filter(move |tile| tile.is_solid() && tile.rect().overlaps(&rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // tileset index 1 is a full block, 2 a 45 degree slope, 3 a half tile
    const SLOPES: [u8; 4] = [0, 1, 5, 30];

    fn sample() -> TileMap {
        let data = [
            0, 0, 2, 0,
            0, 3, 1, 9,
            1, 1, 1, 1,
        ];
        TileMap::from_indices(4, 3, 32., &data, &SLOPES).unwrap()
    }

    #[test]
    fn test_from_indices() {
        let map = sample();

        assert_eq!(map.get(2, 0).unwrap().id, TileId::Slope45Pp);
        assert_eq!(map.get(1, 1).unwrap().id, TileId::HalfDown);
        assert_eq!(map.get(0, 2).unwrap().id, TileId::Full);
        assert_eq!(map.get(0, 0).unwrap().id, TileId::Empty);

        // no slope map entry for index 9
        assert!(!map.get(3, 1).unwrap().is_solid());

        assert_eq!(map.get(1, 1).unwrap().pos, P2::new(48., 48.));
        assert_eq!(map.get(4, 0), None);
        assert_eq!(map.rect().dims(), V2::new(128., 96.));
    }

    #[test]
    fn test_from_indices_errors() {
        let err = TileMap::from_indices(2, 2, 32., &[0, 1, 1], &SLOPES).unwrap_err();
        assert_eq!(err, TileError::DataSize { expected: 4, got: 3 });

        let err = TileMap::from_indices(1, 1, 32., &[1], &[0, 34]).unwrap_err();
        assert_eq!(err, TileError::UnknownId(34));
    }

    #[test]
    fn test_tiles_overlapping() {
        let map = sample();
        let rect = Rect::new_centered(P2::new(64., 64.), V2::new(8., 8.));

        let ids: Vec<_> = map.tiles_overlapping(rect).map(|tile| tile.id).collect();
        assert_eq!(ids, vec![TileId::HalfDown, TileId::Full, TileId::Full, TileId::Full]);
    }

    #[test]
    fn test_tiles_overlapping_edges() {
        let map = sample();

        // touching a cell border doesn't count as overlapping it
        let rect = Rect::new(P2::new(0., 0.), P2::new(64., 64.));
        let ids: Vec<_> = map.tiles_overlapping(rect).map(|tile| tile.id).collect();
        assert_eq!(ids, vec![TileId::HalfDown]);

        let off_map = Rect::new(P2::new(-50., -50.), P2::new(-10., -10.));
        assert_eq!(map.tiles_overlapping(off_map).count(), 0);

        let beyond = Rect::new(P2::new(200., 0.), P2::new(300., 300.));
        assert_eq!(map.tiles_overlapping(beyond).count(), 0);
    }

    #[test]
    fn test_set_and_cell_at() {
        let mut map = TileMap::new(3, 3, 16.);
        assert_eq!(map.cell_at(P2::new(20., 40.)), Some((1, 2)));
        assert_eq!(map.cell_at(P2::new(-1., 4.)), None);
        assert_eq!(map.cell_at(P2::new(4., 48.)), None);

        map.set(1, 2, TileId::ConvexNp);
        assert_eq!(map.get(1, 2).unwrap().kind, crate::tile::TileKind::Convex);

        map.get_mut(1, 2).unwrap().clear();
        assert!(!map.get(1, 2).unwrap().is_solid());
        assert!(map.get_mut(3, 0).is_none());
    }
}
