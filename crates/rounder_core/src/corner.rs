//! Corner positions
//!
//! Atlases and clip regions come in fours. [`CornerSet`] keeps one value per
//! corner in a fixed order so lookups never miss.

use std::ops::{Index, IndexMut};

/// One of the four corners of a window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners, clockwise from the top left
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// One value per corner
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CornerSet<T> {
    values: [T; 4],
}

impl<T> CornerSet<T> {
    /// Build by evaluating `f` for each corner, in [`Corner::ALL`] order
    pub fn from_fn(mut f: impl FnMut(Corner) -> T) -> Self {
        Self {
            values: Corner::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Corner, &T)> {
        Corner::ALL.into_iter().zip(self.values.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Corner, T) -> U) -> CornerSet<U> {
        let mut corners = Corner::ALL.into_iter();
        CornerSet {
            values: self.values.map(|value| {
                let corner = corners.next().unwrap_or(Corner::TopLeft);
                f(corner, value)
            }),
        }
    }
}

impl<T> Index<Corner> for CornerSet<T> {
    type Output = T;

    fn index(&self, corner: Corner) -> &T {
        &self.values[corner.index()]
    }
}

impl<T> IndexMut<Corner> for CornerSet<T> {
    fn index_mut(&mut self, corner: Corner) -> &mut T {
        &mut self.values[corner.index()]
    }
}
