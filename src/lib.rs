#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Nebulabrot renderer
//!
//! The Buddhabrot is a variant of the Mandelbrot set that explores
//! "what's in the black heart" of the Mandelbrot.  Instead of
//! coloring each pixel by how fast its point runs off to infinity,
//! we pick random points on the complex plane, iterate them, and for
//! every point that *does* escape we go back and plot every stop its
//! orbit made along the way, incrementing a per-pixel counter each
//! time an orbit passes through.  The counters form a heatmap, and
//! the heatmap is the image.
//!
//! The Nebulabrot runs that process three times with three different
//! iteration ceilings, one per color channel.  Shallow ceilings
//! emphasize the halo around the set, deep ceilings emphasize the
//! filaments, and layering them as red, green, and blue produces the
//! familiar false-color "nebula" photograph look.  All three
//! channels share a single maximum counter value so their relative
//! brightness stays meaningful across the finished image.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate rand;

pub mod error;
pub mod heatmap;
pub mod nebula;
pub mod orbit;
pub mod planes;
pub mod ppm;

pub use error::Error;
pub use heatmap::Heatmap;
pub use nebula::{NebulaImage, NebulaRenderer, Rendered};
pub use orbit::trajectory;
pub use planes::{PlaneMapper, Viewport};
