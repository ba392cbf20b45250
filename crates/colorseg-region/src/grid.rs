//! Dense boolean grids
//!
//! Per-pixel flags (classification, visited, transparency) stored as a flat
//! row-major array indexed `y * width + x`.

use crate::error::RegionResult;
use colorseg_core::Error;

/// A width x height grid of booleans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitGrid {
    /// Create a grid with every cell cleared
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at (x, y), or `None` outside the grid
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        self.index(x, y).map(|i| self.bits[i])
    }

    /// Whether the cell at (x, y) is set; `false` outside the grid
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// Set the cell at (x, y)
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the grid.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> RegionResult<()> {
        let index = self.index(x, y).ok_or(Error::IndexOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.bits[index] = value;
        Ok(())
    }

    /// Number of set cells
    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Iterate over the coordinates of set cells in row-major order
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}
