//! Pixel regions
//!
//! A [`Region`] is a set of pixels stored as non-overlapping rectangles. It
//! supports the handful of operations the effect needs: union with a rect,
//! subtraction, translation and bounding box queries. The rect list is not
//! canonical; two regions covering the same pixels may store different
//! rects, so compare with [`Region::covers_same`].

use smallvec::SmallVec;

use crate::geometry::IRect;

/// Set of pixels made of non-overlapping rectangles
#[derive(Clone, Debug, Default)]
pub struct Region {
    rects: Vec<IRect>,
}

impl Region {
    /// Empty region
    pub fn new() -> Self {
        Self::default()
    }

    /// Region covering a single rect (empty rects produce an empty region)
    pub fn from_rect(rect: IRect) -> Self {
        let mut region = Self::new();
        region.add_rect(rect);
        region
    }

    /// Region covering the union of the given rects
    pub fn from_rects(rects: impl IntoIterator<Item = IRect>) -> Self {
        let mut region = Self::new();
        for rect in rects {
            region.add_rect(rect);
        }
        region
    }

    /// Build from rects already known not to overlap
    pub(crate) fn from_disjoint(rects: Vec<IRect>) -> Self {
        Self {
            rects: rects.into_iter().filter(|r| !r.is_empty()).collect(),
        }
    }

    pub fn rects(&self) -> &[IRect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of pixels covered
    pub fn area(&self) -> i64 {
        self.rects.iter().map(IRect::area).sum()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|r| r.contains(x, y))
    }

    /// Bounding box of every rect, or an empty rect for an empty region
    pub fn bounding_rect(&self) -> IRect {
        self.rects
            .iter()
            .fold(IRect::default(), |acc, r| acc.union(r))
    }

    /// Add the pixels of `rect` that are not covered yet
    pub fn add_rect(&mut self, rect: IRect) {
        if rect.is_empty() {
            return;
        }
        let mut pieces: SmallVec<[IRect; 4]> = SmallVec::new();
        pieces.push(rect);
        for existing in &self.rects {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| subtract_rect(piece, existing))
                .collect();
            if pieces.is_empty() {
                return;
            }
        }
        self.rects.extend(pieces);
    }

    /// Union with another region in place
    pub fn add_region(&mut self, other: &Region) {
        for rect in &other.rects {
            self.add_rect(*rect);
        }
    }

    /// Remove every pixel of `rect`
    pub fn subtract_rect(&mut self, rect: IRect) {
        if rect.is_empty() {
            return;
        }
        self.rects = self
            .rects
            .iter()
            .flat_map(|r| subtract_rect(*r, &rect))
            .collect();
    }

    /// Remove every pixel of `other` in place
    pub fn subtract_region(&mut self, other: &Region) {
        for rect in &other.rects {
            self.subtract_rect(*rect);
        }
    }

    /// Copy of this region without the pixels of `other`
    pub fn subtracted(&self, other: &Region) -> Region {
        let mut result = self.clone();
        result.subtract_region(other);
        result
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        for rect in &mut self.rects {
            *rect = rect.translated(dx, dy);
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Region {
        let mut result = self.clone();
        result.translate(dx, dy);
        result
    }

    /// True when both regions cover exactly the same pixels
    pub fn covers_same(&self, other: &Region) -> bool {
        self.area() == other.area() && self.subtracted(other).is_empty()
    }
}

impl From<IRect> for Region {
    fn from(rect: IRect) -> Self {
        Region::from_rect(rect)
    }
}

/// `a` minus `b`, as up to four bands: above, below, left and right of the
/// overlap.
fn subtract_rect(a: IRect, b: &IRect) -> SmallVec<[IRect; 4]> {
    let mut out = SmallVec::new();
    let Some(overlap) = a.intersection(b) else {
        out.push(a);
        return out;
    };

    let bands = [
        IRect::from_ltrb(a.x, a.y, a.right(), overlap.y),
        IRect::from_ltrb(a.x, overlap.bottom(), a.right(), a.bottom()),
        IRect::from_ltrb(a.x, overlap.y, overlap.x, overlap.bottom()),
        IRect::from_ltrb(overlap.right(), overlap.y, a.right(), overlap.bottom()),
    ];
    out.extend(bands.into_iter().filter(|r| !r.is_empty()));
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Row-run construction
// ─────────────────────────────────────────────────────────────────────────────

/// Incremental builder that turns horizontal pixel runs into rects,
/// merging identical runs on consecutive rows.
#[derive(Default)]
pub struct RegionBuilder {
    closed: Vec<IRect>,
    open: Vec<IRect>,
    row: Option<i32>,
    row_runs: Vec<(i32, i32)>,
}

impl RegionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record pixels `x_start..x_end` on row `y`. Rows must be pushed in
    /// increasing order and runs within a row must not overlap.
    pub fn push_run(&mut self, y: i32, x_start: i32, x_end: i32) {
        if x_end <= x_start {
            return;
        }
        if self.row != Some(y) {
            self.flush_row();
            self.row = Some(y);
        }
        self.row_runs.push((x_start, x_end));
    }

    fn flush_row(&mut self) {
        let Some(y) = self.row else {
            return;
        };
        let mut next_open = Vec::with_capacity(self.row_runs.len());
        for (start, end) in self.row_runs.drain(..) {
            let continued = self.open.iter().position(|r| {
                r.x == start && r.right() == end && r.bottom() == y
            });
            match continued {
                Some(index) => {
                    let mut rect = self.open.swap_remove(index);
                    rect.height += 1;
                    next_open.push(rect);
                }
                None => next_open.push(IRect::new(start, y, end - start, 1)),
            }
        }
        self.closed.append(&mut self.open);
        self.open = next_open;
    }

    pub fn finish(mut self) -> Region {
        self.flush_row();
        self.closed.append(&mut self.open);
        Region::from_disjoint(self.closed)
    }
}
