// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport, a rectangle on the complex plane, and the
//! PlaneMapper, which describes the relationship between that
//! rectangle and the integral plane of the output image.  Orbit
//! points live on the complex plane; heatmap cells live on the
//! integral plane; everything interesting happens in the crossing.

use error::Error;
use num::Complex;

/// The rectangle of the complex plane being rendered, described by
/// its two extreme corners.  The real part of each corner is the
/// x-component and the imaginary part is the y-component.  Immutable
/// for the lifetime of a generation run.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    /// The lower-left corner: smallest real and imaginary parts.
    pub min: Complex<f64>,
    /// The upper-right corner: largest real and imaginary parts.
    pub max: Complex<f64>,
}

impl Viewport {
    /// Constructor.  The corners must describe a rectangle with
    /// positive area; a flat or inverted viewport has nowhere to put
    /// a sample and is rejected as a configuration error.
    pub fn new(min: Complex<f64>, max: Complex<f64>) -> Result<Viewport, Error> {
        if min.re >= max.re || min.im >= max.im {
            return Err(Error::BadViewport {
                min_re: min.re,
                max_re: max.re,
                min_im: min.im,
                max_im: max.im,
            });
        }
        Ok(Viewport { min, max })
    }

    /// The extent of the viewport along the real axis.
    pub fn re_span(&self) -> f64 {
        self.max.re - self.min.re
    }

    /// The extent of the viewport along the imaginary axis.
    pub fn im_span(&self) -> f64 {
        self.max.im - self.min.im
    }

    /// Whether a point lies within the viewport.  Inclusive on both
    /// ends of both axes: a point exactly on the max boundary is
    /// still "in," and the mapper is responsible for keeping it
    /// inside the grid.
    pub fn contains(&self, point: &Complex<f64>) -> bool {
        point.re >= self.min.re
            && point.re <= self.max.re
            && point.im >= self.min.im
            && point.im <= self.max.im
    }
}

/// Maps points on the complex plane to cells of the heatmap grid.
///
/// The orientation is deliberately transposed from the usual raster
/// convention: the real axis runs down the rows and the imaginary
/// axis runs across the columns, which is what stands the final
/// figure upright instead of laying it on its side.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Columns in the grid (image width in pixels).
    pub width: usize,
    /// Rows in the grid (image height in pixels).
    pub height: usize,
    /// The viewport being mapped.
    pub viewport: Viewport,
    // Multipliers taking axis offsets to fractional row/column.
    row_factor: f64,
    col_factor: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the pixel dimensions of the grid and the
    /// viewport to stretch across it.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, Error> {
        if width == 0 || height == 0 {
            return Err(Error::BadDimensions { width, height });
        }
        Ok(PlaneMapper {
            width,
            height,
            viewport,
            row_factor: (height as f64) / viewport.re_span(),
            col_factor: (width as f64) / viewport.im_span(),
        })
    }

    /// The total number of cells in the grid.  Used to size buffers.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the grid holds no cells.  It never does; the
    /// constructor rejects empty dimensions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map an orbit point to the (row, column) of the cell it visits,
    /// or None if the point lies outside the viewport.  The bounds
    /// check is inclusive of the max boundary, and since flooring a
    /// boundary point would index one past the last row or column,
    /// the computed indices are clamped to the final row/column
    /// instead.
    pub fn point_to_cell(&self, point: &Complex<f64>) -> Option<(usize, usize)> {
        if !self.viewport.contains(point) {
            return None;
        }
        let row = ((point.re - self.viewport.min.re) * self.row_factor) as usize;
        let col = ((point.im - self.viewport.min.im) * self.col_factor) as usize;
        Some((row.min(self.height - 1), col.min(self.width - 1)))
    }

    /// Like `point_to_cell`, but flattened into the linear offset of
    /// the cell in a row-major buffer.  Used by the threaded driver,
    /// which accumulates into raw per-worker slices.
    pub fn point_to_offset(&self, point: &Complex<f64>) -> Option<usize> {
        self.point_to_cell(point).map(|(row, col)| row * self.width + col)
    }
}
