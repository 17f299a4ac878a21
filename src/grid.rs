//! Grid geometry and whole-frame evaluation

use log::warn;
use rand::RngCore;

use crate::color::{BLACK, Rgb};
use crate::pattern::PatternId;

/// Dimensions of the LED grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub cols: u16,
    pub rows: u16,
}

impl GridSize {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Number of cells in the grid
    pub const fn count(self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub const fn is_empty(self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Largest grid with the same width that fits into `max_cells`
    ///
    /// Whole rows are dropped from the bottom.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn fit(self, max_cells: usize) -> Self {
        if self.count() <= max_cells {
            return self;
        }
        let rows = max_cells / self.cols as usize;
        Self {
            cols: self.cols,
            rows: rows as u16,
        }
    }
}

/// Get the part of the buffer covered by the grid
pub(crate) fn bounded(cells: &mut [Rgb], size: GridSize) -> &mut [Rgb] {
    &mut cells[..size.count()]
}

/// One evaluated frame
///
/// Row-major view into the evaluator's buffer. Brightness is not applied;
/// presentation layers do that.
#[derive(Debug, Clone, Copy)]
pub struct GridFrame<'a> {
    cells: &'a [Rgb],
    size: GridSize,
    time: f64,
}

impl<'a> GridFrame<'a> {
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Pattern time the frame was evaluated at
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// All cells, row after row
    pub const fn cells(&self) -> &'a [Rgb] {
        self.cells
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &'a [Rgb]> + use<'a> {
        self.cells.chunks_exact(usize::from(self.size.cols.max(1)))
    }

    /// Color of the cell at column `x`, row `y`
    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.size.cols || y >= self.size.rows {
            return None;
        }
        let index = usize::from(y) * usize::from(self.size.cols) + usize::from(x);
        self.cells.get(index).copied()
    }
}

/// Evaluates a pattern over every cell of a grid
///
/// Owns the frame buffer and the random source handed to patterns that
/// need one.
pub struct GridEvaluator<R: RngCore, const MAX_CELLS: usize> {
    rng: R,
    cells: [Rgb; MAX_CELLS],
}

impl<R: RngCore, const MAX_CELLS: usize> GridEvaluator<R, MAX_CELLS> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            cells: [BLACK; MAX_CELLS],
        }
    }

    /// Evaluate `pattern` for every cell, row-major
    ///
    /// Grids larger than `MAX_CELLS` are clipped to the rows that fit.
    pub fn evaluate(
        &mut self,
        pattern: PatternId,
        size: GridSize,
        t: f64,
        palette: &[Rgb],
    ) -> GridFrame<'_> {
        let fitted = size.fit(MAX_CELLS);
        if fitted != size {
            warn!(
                "grid {}x{} exceeds {} cells, clipped to {} rows",
                size.cols, size.rows, MAX_CELLS, fitted.rows
            );
        }

        let frame = bounded(&mut self.cells, fitted);
        if !fitted.is_empty() {
            let cols = usize::from(fitted.cols);
            for (y, row) in frame.chunks_exact_mut(cols).enumerate() {
                let y = u16::try_from(y).unwrap_or(u16::MAX);
                for (x, cell) in row.iter_mut().enumerate() {
                    let x = u16::try_from(x).unwrap_or(u16::MAX);
                    *cell = pattern.color_at(x, y, t, fitted, palette, &mut self.rng);
                }
            }
        }

        GridFrame {
            cells: frame,
            size: fitted,
            time: t,
        }
    }
}
