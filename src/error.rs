// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Failure conditions for a render run.  A run either completes or
//! fails outright; nothing here is retried.

/// Everything that can sink a generation run.  Configuration errors
/// are caught at construction time; the degenerate-maximum case is
/// caught at the boundary of normalization, before any division
/// happens.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The image must have at least one pixel in each direction.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    BadDimensions {
        /// Requested image width in pixels.
        width: usize,
        /// Requested image height in pixels.
        height: usize,
    },

    /// The viewport corners must describe a rectangle with positive
    /// area: min strictly below max on both axes.
    #[fail(
        display = "viewport is empty or inverted: re [{}, {}], im [{}, {}]",
        min_re, max_re, min_im, max_im
    )]
    BadViewport {
        /// Left edge on the real axis.
        min_re: f64,
        /// Right edge on the real axis.
        max_re: f64,
        /// Bottom edge on the imaginary axis.
        min_im: f64,
        /// Top edge on the imaginary axis.
        max_im: f64,
    },

    /// The samples-per-pixel multiplier must be at least one.
    #[fail(display = "samples-per-pixel must be positive")]
    BadSampleCount,

    /// Every channel needs a positive iteration ceiling.
    #[fail(display = "iteration budget for the {} channel must be positive", channel)]
    BadIterationBudget {
        /// Which channel had the zero budget.
        channel: &'static str,
    },

    /// The threaded driver needs at least one worker.
    #[fail(display = "thread count must be positive")]
    BadThreadCount,

    /// Accumulation finished without a single orbit point landing in
    /// the viewport, so there is no maximum to normalize against.
    /// Usually a sign of a viewport buried inside the set, or of
    /// iteration budgets too small to let anything escape.
    #[fail(display = "no escaping samples recorded; nothing to normalize")]
    NoEscapingSamples,
}
