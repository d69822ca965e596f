use geo::{coord, LineString, Polygon, Rect};

use crate::error::{PrepError, Result};

/// Validated tile side length in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize(u64);

impl TileSize {
    pub fn new(meters: i64) -> Result<Self> {
        if meters <= 0 {
            return Err(PrepError::InvalidTileSize(meters));
        }
        Ok(Self(meters as u64))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn meters(&self) -> f64 {
        self.0 as f64
    }
}

/// Tile-aligned grid covering a projected bounding box.
///
/// Columns run west to east from the snapped minimum x, rows north to south
/// from the snapped maximum y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    size: f64,
    /// Snapped west edge, in tile units
    col_min: f64,
    /// Snapped north edge, in tile units
    row_max: f64,
    pub nx: usize,
    pub ny: usize,
}

impl GridLayout {
    /// Snap `bounds` outward to multiples of the tile size.
    pub fn covering(bounds: &Rect<f64>, size: TileSize) -> Self {
        let s = size.meters();
        let col_min = (bounds.min().x / s).floor();
        let col_max = (bounds.max().x / s).ceil();
        let row_min = (bounds.min().y / s).floor();
        let row_max = (bounds.max().y / s).ceil();

        Self {
            size: s,
            col_min,
            row_max,
            nx: (col_max - col_min) as usize,
            ny: (row_max - row_min) as usize,
        }
    }

    /// Union of all tiles: `[t_xmin, t_ymin] x [t_xmax, t_ymax]`
    pub fn extent(&self) -> Rect<f64> {
        let s = self.size;
        Rect::new(
            coord! { x: self.col_min * s, y: (self.row_max - self.ny as f64) * s },
            coord! { x: (self.col_min + self.nx as f64) * s, y: self.row_max * s },
        )
    }

    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-left corner of tile `(h, v)`.
    pub fn origin(&self, h: usize, v: usize) -> (f64, f64) {
        (
            (self.col_min + h as f64) * self.size,
            (self.row_max - v as f64) * self.size,
        )
    }

    /// Closed ring clockwise from the top-left corner.
    pub fn tile_polygon(&self, h: usize, v: usize) -> Polygon<f64> {
        let (x, y) = self.origin(h, v);
        let s = self.size;
        let ring = LineString::from(vec![
            (x, y),
            (x + s, y),
            (x + s, y - s),
            (x, y - s),
            (x, y),
        ]);
        Polygon::new(ring, vec![])
    }

    /// The `index`-th cell in row-major order by `h`, then `v`.
    pub fn cell(&self, index: usize) -> (usize, usize, Polygon<f64>) {
        let h = index / self.ny;
        let v = index % self.ny;
        (h, v, self.tile_polygon(h, v))
    }

    /// Lazily walk every cell; can be called again to restart.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Polygon<f64>)> + '_ {
        (0..self.len()).map(move |i| self.cell(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rect(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Rect<f64> {
        Rect::new(coord! { x: xmin, y: ymin }, coord! { x: xmax, y: ymax })
    }

    #[test]
    fn test_tile_size_rejects_non_positive() {
        assert!(matches!(TileSize::new(0), Err(PrepError::InvalidTileSize(0))));
        assert!(matches!(TileSize::new(-250), Err(PrepError::InvalidTileSize(-250))));
        assert_eq!(TileSize::new(5000).unwrap().get(), 5000);
    }

    #[test]
    fn test_snaps_outward_with_floor_and_ceil() {
        let size = TileSize::new(1000).unwrap();
        let bounds = rect(412_345.6, 4_180_010.0, 415_000.0, 4_182_999.9);
        let layout = GridLayout::covering(&bounds, size);

        let extent = layout.extent();
        assert_eq!(extent.min().x, 412_000.0);
        assert_eq!(extent.min().y, 4_180_000.0);
        assert_eq!(extent.max().x, 415_000.0);
        assert_eq!(extent.max().y, 4_183_000.0);
        assert_eq!(layout.nx, 3);
        assert_eq!(layout.ny, 3);
    }

    #[test]
    fn test_coverage_count_and_indices() {
        let cases = [
            (rect(0.0, 0.0, 10_000.0, 10_000.0), 5000),
            (rect(501.0, 7.5, 20_499.0, 3_333.0), 1000),
            (rect(-12_345.0, -999.0, 3.0, 4_001.0), 2500),
            (rect(166_021.4, 1_116_915.0, 833_978.6, 9_999_999.0), 100_000),
            (rect(100.0, 100.0, 101.0, 101.0), 30),
        ];

        for (bounds, t_size) in cases {
            let size = TileSize::new(t_size).unwrap();
            let s = size.meters();
            let layout = GridLayout::covering(&bounds, size);
            let extent = layout.extent();

            assert_eq!(extent.min().x, (bounds.min().x / s).floor() * s);
            assert_eq!(extent.min().y, (bounds.min().y / s).floor() * s);
            assert_eq!(extent.max().x, (bounds.max().x / s).ceil() * s);
            assert_eq!(extent.max().y, (bounds.max().y / s).ceil() * s);

            assert!(extent.min().x <= bounds.min().x && extent.max().x >= bounds.max().x);
            assert!(extent.min().y <= bounds.min().y && extent.max().y >= bounds.max().y);

            let expected = ((extent.width() / s) * (extent.height() / s)).round() as usize;
            assert_eq!(layout.len(), expected);

            let cells: Vec<_> = layout.cells().collect();
            assert_eq!(cells.len(), expected);

            let pairs: HashSet<(usize, usize)> =
                cells.iter().map(|(h, v, _)| (*h, *v)).collect();
            assert_eq!(pairs.len(), cells.len());
            assert!(pairs.iter().all(|(h, v)| *h < layout.nx && *v < layout.ny));
        }
    }

    #[test]
    fn test_rows_run_north_to_south() {
        let size = TileSize::new(1000).unwrap();
        let layout = GridLayout::covering(&rect(0.0, 0.0, 2000.0, 3000.0), size);
        assert_eq!(layout.origin(0, 0), (0.0, 3000.0));
        assert_eq!(layout.origin(0, 2), (0.0, 1000.0));
        assert_eq!(layout.origin(1, 0), (1000.0, 3000.0));

        // row-major by h, then v
        let order: Vec<(usize, usize)> = layout.cells().map(|(h, v, _)| (h, v)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_tile_ring_is_clockwise_from_top_left() {
        let layout = GridLayout::covering(&rect(0.0, 0.0, 10.0, 10.0), TileSize::new(10).unwrap());
        let polygon = layout.tile_polygon(0, 0);
        let coords: Vec<(f64, f64)> = polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            coords,
            vec![(0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0), (0.0, 10.0)]
        );
    }

    #[test]
    fn test_cells_restartable() {
        let size = TileSize::new(1000).unwrap();
        let layout = GridLayout::covering(&rect(0.0, 0.0, 3000.0, 2000.0), size);
        let first: Vec<_> = layout.cells().collect();
        let second: Vec<_> = layout.cells().collect();
        assert_eq!(first, second);
    }
}
