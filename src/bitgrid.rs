//! A square bit grid whose side length is chosen at runtime.
//!
//! The grid is `no_std` friendly. Cells are packed row-major into words of
//! the unsigned integer `T`, so an `N×N` grid needs `ceil(N*N / T::BITS)`
//! words regardless of `N`.

use alloc::vec;
use alloc::vec::Vec;
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Row or column index is out of bounds `[0..size)`.
    IndexOutOfBounds { row: usize, col: usize, size: usize },
    /// Two grids of different side lengths were combined.
    SizeMismatch { left: usize, right: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::IndexOutOfBounds { row, col, size } => {
                write!(f, "IndexOutOfBounds: row={}, col={}, size={}", row, col, size)
            }
            GridError::SizeMismatch { left, right } => {
                write!(f, "SizeMismatch: {}x{} vs {}x{}", left, left, right, right)
            }
        }
    }
}

/// A `size×size` grid of bits stored in words of type `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty grid (all bits cleared).
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let words = cells.div_ceil(Self::WORD_BITS);
        BitGrid {
            size,
            words: vec![T::zero(); words],
        }
    }

    /// Creates a grid from an iterator over `(row, col)` positions.
    pub fn from_cells<I>(size: usize, cells: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(size);
        for (r, c) in cells {
            grid.set(r, c)?;
        }
        Ok(grid)
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size * size`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Returns `true` when `(row, col)` lies inside the grid.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let (word, bit) = self.locate(row, col)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Returns `true` if any cell is set in both grids.
    pub fn intersects(&self, other: &Self) -> Result<bool, GridError> {
        self.check_same_size(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| !(*a & *b).is_zero()))
    }

    /// Sets every cell that is set in `other`.
    pub fn union_with(&mut self, other: &Self) -> Result<(), GridError> {
        self.check_same_size(other)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a = *a | *b;
        }
        Ok(())
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter_set(&self) -> SetCells<'_, T> {
        SetCells { grid: self, idx: 0 }
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> Result<(usize, usize), GridError> {
        if !self.contains(row, col) {
            return Err(GridError::IndexOutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        let idx = row * self.size + col;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    #[inline]
    fn check_same_size(&self, other: &Self) -> Result<(), GridError> {
        if self.size != other.size {
            Err(GridError::SizeMismatch {
                left: self.size,
                right: other.size,
            })
        } else {
            Ok(())
        }
    }
}

impl<T> fmt::Debug for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid {}x{}:", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.get(r, c).unwrap_or(false) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a grid.
#[derive(Clone, Copy)]
pub struct SetCells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    grid: &'a BitGrid<T>,
    idx: usize,
}

impl<'a, T> Iterator for SetCells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.grid.size;
        while self.idx < size * size {
            let idx = self.idx;
            self.idx += 1;
            let (r, c) = (idx / size, idx % size);
            if self.grid.get(r, c).unwrap_or(false) {
                return Some((r, c));
            }
        }
        None
    }
}
