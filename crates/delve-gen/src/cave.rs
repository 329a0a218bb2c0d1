//! The raw generator grid: [`CaveGrid`] of [`GridType`] cells, and the
//! [`SkipList`] of protected locations.

use std::fmt;

use delve_core::{ParseError, Point, Range};

/// State of one generator cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridType {
    /// Rock.
    #[default]
    Filled,
    /// Floor.
    Empty,
}

/// A width×height grid of fill/empty cells being shaped by the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveGrid {
    bounds: Range,
    cells: Vec<GridType>,
}

impl CaveGrid {
    /// A completely filled grid.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width, height);
        Self {
            bounds,
            cells: vec![GridType::Filled; bounds.len()],
        }
    }

    /// Parse a grid drawn with `#` (filled) and `.` (empty).
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(ParseError::Empty);
        };
        let width = first.chars().count();
        let mut grid = Self::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '#' => {}
                    '.' => grid.set(pos, GridType::Empty),
                    _ => return Err(ParseError::InvalidGlyph { ch, pos }),
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<GridType> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, t: GridType) {
        if let Some(i) = self.index(p) {
            self.cells[i] = t;
        }
    }

    /// Whether `p` is filled. Out-of-bounds points count as filled.
    #[inline]
    pub fn is_filled(&self, p: Point) -> bool {
        self.at(p) != Some(GridType::Empty)
    }

    /// Whether `p` lies on the outermost ring.
    #[inline]
    pub fn is_border(&self, p: Point) -> bool {
        self.bounds.on_border(p)
    }

    /// Empty cells in row-major order. Generated caves only open border
    /// cells that a skip list protects.
    pub fn open_cells(&self) -> Vec<Point> {
        self.bounds.iter().filter(|&p| !self.is_filled(p)).collect()
    }

    /// Number of empty cells.
    pub fn count_open(&self) -> usize {
        self.bounds.iter().filter(|&p| !self.is_filled(p)).count()
    }

    /// Whether `p` is one of the four grid corners.
    #[inline]
    pub fn is_corner(&self, p: Point) -> bool {
        let (x1, y1) = (self.bounds.width() - 1, self.bounds.height() - 1);
        (p.x == 0 || p.x == x1) && (p.y == 0 || p.y == y1) && self.bounds.contains(p)
    }

    #[inline]
    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }
}

impl fmt::Display for CaveGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.bounds.width().max(1) as usize;
        for row in self.cells.chunks(w) {
            for c in row {
                let ch = match c {
                    GridType::Filled => '#',
                    GridType::Empty => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Locations that are forced empty and never mutated by the generator,
/// e.g. the footprint of an exit passage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkipList {
    points: Vec<Point>,
}

impl SkipList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, p: Point) {
        if !self.points.contains(&p) {
            self.points.push(p);
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Per-cell membership mask for `bounds`, indexed row-major.
    pub(crate) fn mask(&self, bounds: Range) -> Vec<bool> {
        let mut mask = vec![false; bounds.len()];
        let w = bounds.width();
        for p in self.points.iter().filter(|&&p| bounds.contains(p)) {
            mask[(p.y * w + p.x) as usize] = true;
        }
        mask
    }
}

impl FromIterator<Point> for SkipList {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut list = Self::new();
        for p in iter {
            list.add(p);
        }
        list
    }
}

impl Extend<Point> for SkipList {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.add(p);
        }
    }
}
