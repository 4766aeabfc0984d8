// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The heatmap: one counter per pixel, stored as a single contiguous
//! row-major buffer.  Cells only ever go up during accumulation, and
//! the buffer is dropped with the run; no manual lifetime juggling.

use error::Error;

/// A fixed-size grid of visit counters for one color channel.
/// Dimensions never change after construction.
#[derive(Clone, Debug)]
pub struct Heatmap {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Heatmap {
    /// A zeroed grid of `width` × `height` counters.
    pub fn new(width: usize, height: usize) -> Heatmap {
        Heatmap {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Adopt a raw row-major buffer as a heatmap.  The threaded
    /// driver accumulates into plain slices and rewraps them here.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u32>) -> Heatmap {
        assert_eq!(cells.len(), width * height);
        Heatmap { width, height, cells }
    }

    /// Columns in the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows in the grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw counters, row-major.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Increment one cell and hand back its new count, so the caller
    /// can fold it into the running global maximum.
    pub fn record(&mut self, row: usize, col: usize) -> u32 {
        let cell = &mut self.cells[row * self.width + col];
        *cell += 1;
        *cell
    }

    /// Cell-wise sum of another grid into this one.  Used to fold
    /// per-worker partial grids together after a threaded run.
    pub fn merge(&mut self, other: &Heatmap) {
        assert_eq!(self.cells.len(), other.cells.len());
        for (mine, theirs) in self.cells.iter_mut().zip(other.cells.iter()) {
            *mine += *theirs;
        }
    }

    /// The largest count anywhere in the grid.
    pub fn max(&self) -> u32 {
        self.cells.iter().cloned().max().unwrap_or(0)
    }

    /// The total number of orbit visits recorded in the grid.
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Rescale every counter to `[0, depth]` against the shared
    /// global maximum, producing one byte per pixel.  Fails when no
    /// visit was ever recorded anywhere: with a zero maximum there is
    /// no scale, only a division by zero waiting to happen.
    pub fn normalized(&self, global_max: u32, depth: u32) -> Result<Vec<u8>, Error> {
        if global_max == 0 {
            return Err(Error::NoEscapingSamples);
        }
        Ok(self.cells.iter().map(|&c| scale(c, global_max, depth)).collect())
    }
}

/// Linear rescale of one counter to the output color depth:
/// floor(value × depth / max).  No gamma, no log curve; channels
/// scaled by the same maximum stay comparable to each other.
pub fn scale(value: u32, global_max: u32, depth: u32) -> u8 {
    ((u64::from(value) * u64::from(depth)) / u64::from(global_max)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_heatmaps_are_zeroed() {
        let map = Heatmap::new(3, 2);
        assert_eq!(map.cells(), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(map.max(), 0);
        assert_eq!(map.sum(), 0);
    }

    #[test]
    fn record_increments_and_reports() {
        let mut map = Heatmap::new(3, 3);
        assert_eq!(map.record(1, 2), 1);
        assert_eq!(map.record(1, 2), 2);
        assert_eq!(map.record(0, 0), 1);
        assert_eq!(map.cells()[1 * 3 + 2], 2);
        assert_eq!(map.sum(), 3);
        assert_eq!(map.max(), 2);
    }

    #[test]
    fn merge_sums_cell_wise() {
        let mut a = Heatmap::new(2, 2);
        let mut b = Heatmap::new(2, 2);
        a.record(0, 0);
        b.record(0, 0);
        b.record(1, 1);
        a.merge(&b);
        assert_eq!(a.cells(), &[2, 0, 0, 1]);
        assert_eq!(a.max(), 2);
    }

    #[test]
    fn scale_spans_the_output_depth() {
        assert_eq!(scale(0, 100, 255), 0);
        assert_eq!(scale(100, 100, 255), 255);
        assert_eq!(scale(50, 100, 255), 127);
        for v in 0..=100 {
            let s = scale(v, 100, 255);
            assert!(u32::from(s) <= 255);
        }
    }

    #[test]
    fn scale_survives_large_counts() {
        // u32::MAX * 255 overflows u32; the math runs in u64.
        assert_eq!(scale(u32::max_value(), u32::max_value(), 255), 255);
    }

    #[test]
    fn normalize_rejects_a_zero_maximum() {
        let map = Heatmap::new(2, 2);
        assert_eq!(map.normalized(0, 255), Err(Error::NoEscapingSamples));
    }

    #[test]
    fn normalize_scales_every_cell() {
        let mut map = Heatmap::new(2, 2);
        map.record(0, 0);
        map.record(0, 0);
        map.record(1, 1);
        let bytes = map.normalized(2, 255).unwrap();
        assert_eq!(bytes, vec![255, 0, 0, 127]);
    }
}
