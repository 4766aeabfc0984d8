// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The NebulaRenderer drives the whole pipeline: draw random samples
//! from the viewport, walk their escape trajectories, fold every
//! in-viewport orbit point into the channel's heatmap, and keep one
//! running maximum across all three channels.  Channels accumulate
//! strictly red, then green, then blue; normalization only happens
//! once the last of them is done, because the shared maximum isn't
//! final until then.

extern crate crossbeam;

use std::time::{Duration, Instant};

use num::Complex;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use error::Error;
use heatmap::Heatmap;
use orbit::trajectory;
use planes::{PlaneMapper, Viewport};

/// Output color depth: 8 bits per channel.
pub const COLOR_DEPTH: u32 = 255;

// Accumulation order, and the names used in budgets and errors.
const CHANNELS: [&str; 3] = ["red", "green", "blue"];

// Progress cadence: one early report so the user knows the run is
// alive, then a slow heartbeat.
const FIRST_REPORT: Duration = Duration::from_secs(5);
const REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// The renderer contains the parameters by which a nebulabrot is
/// generated.  Once set, this object is not mutable; a run borrows it
/// and hands back the accumulated grids.
pub struct NebulaRenderer {
    plane: PlaneMapper,
    samples_per_channel: usize,
    iterations: [usize; 3],
}

impl NebulaRenderer {
    /// Requires the width and height of the image, the number of
    /// random samples to draw per pixel, the viewport on the complex
    /// plane, and the per-channel iteration ceilings in red, green,
    /// blue order.  Every parameter is checked here; a run never
    /// starts with a configuration that can't finish.
    pub fn new(
        width: usize,
        height: usize,
        samples_per_pixel: usize,
        viewport: Viewport,
        iterations: (usize, usize, usize),
    ) -> Result<Self, Error> {
        let plane = PlaneMapper::new(width, height, viewport)?;
        if samples_per_pixel == 0 {
            return Err(Error::BadSampleCount);
        }
        let iterations = [iterations.0, iterations.1, iterations.2];
        for (&limit, &channel) in iterations.iter().zip(CHANNELS.iter()) {
            if limit == 0 {
                return Err(Error::BadIterationBudget { channel });
            }
        }
        Ok(NebulaRenderer {
            plane,
            samples_per_channel: width * height * samples_per_pixel,
            iterations,
        })
    }

    /// The number of random samples drawn for each channel.
    pub fn samples_per_channel(&self) -> usize {
        self.samples_per_channel
    }

    /// Run the full sequential pipeline with the random source the
    /// caller provides.  Handing the generator in keeps a run
    /// reproducible under a fixed seed; production callers seed from
    /// the clock, tests from a constant.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Rendered {
        let mut max: u32 = 0;
        let mut progress = Progress::new((self.samples_per_channel * 3) as u64);

        let mut red = Heatmap::new(self.plane.width, self.plane.height);
        let mut green = Heatmap::new(self.plane.width, self.plane.height);
        let mut blue = Heatmap::new(self.plane.width, self.plane.height);
        self.accumulate(&mut red, self.iterations[0], rng, &mut max, &mut progress);
        self.accumulate(&mut green, self.iterations[1], rng, &mut max, &mut progress);
        self.accumulate(&mut blue, self.iterations[2], rng, &mut max, &mut progress);

        Rendered { red, green, blue, max }
    }

    /// One channel's worth of sampling.  Every in-viewport stop of
    /// every escaping orbit bumps a cell; the returned count feeds
    /// the running maximum, which only ever climbs.
    fn accumulate<R: Rng>(
        &self,
        map: &mut Heatmap,
        limit: usize,
        rng: &mut R,
        max: &mut u32,
        progress: &mut Progress,
    ) {
        let viewport = self.plane.viewport;
        let re_dist = Uniform::new_inclusive(viewport.min.re, viewport.max.re);
        let im_dist = Uniform::new_inclusive(viewport.min.im, viewport.max.im);
        for _ in 0..self.samples_per_channel {
            progress.tick();
            let sample = Complex::new(re_dist.sample(rng), im_dist.sample(rng));
            for point in trajectory(sample, limit) {
                if let Some((row, col)) = self.plane.point_to_cell(&point) {
                    let count = map.record(row, col);
                    if count > *max {
                        *max = count;
                    }
                }
            }
        }
    }

    /// A multi-threaded version of the run.  Each channel's samples
    /// are split across workers, each worker drawing from its own
    /// seeded random stream into its own partial grid; the partials
    /// are summed per channel, and the shared maximum is taken over
    /// the merged cells only after every worker of every channel has
    /// finished.  Same semantics as the sequential run, different
    /// random streams.
    pub fn generate_threaded(&self, threads: usize, seed: u64) -> Result<Rendered, Error> {
        if threads == 0 {
            return Err(Error::BadThreadCount);
        }
        let red = self.threaded_channel(0, threads, seed);
        let green = self.threaded_channel(1, threads, seed);
        let blue = self.threaded_channel(2, threads, seed);
        let max = red.max().max(green.max()).max(blue.max());
        Ok(Rendered { red, green, blue, max })
    }

    fn threaded_channel(&self, channel: usize, threads: usize, seed: u64) -> Heatmap {
        let limit = self.iterations[channel];
        let per_worker = self.samples_per_channel / threads;
        let spare = self.samples_per_channel % threads;

        let mut allocation = vec![0u32; self.plane.len() * threads];
        crossbeam::scope(|spawner| {
            for (worker, region) in allocation.chunks_mut(self.plane.len()).enumerate() {
                // The first `spare` workers pick up one leftover
                // sample each so the channel total stays exact.
                let samples = per_worker + if worker < spare { 1 } else { 0 };
                let stream = (channel * threads + worker) as u64;
                spawner.spawn(move |_| {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(stream));
                    self.accumulate_into(region, limit, samples, &mut rng);
                });
            }
        })
        .unwrap();

        let mut merged = Heatmap::new(self.plane.width, self.plane.height);
        for region in allocation.chunks(self.plane.len()) {
            merged.merge(&Heatmap::from_cells(
                self.plane.width,
                self.plane.height,
                region.to_vec(),
            ));
        }
        info!("{} channel accumulation complete", CHANNELS[channel]);
        merged
    }

    /// The worker-side accumulation loop: same sampling as the
    /// sequential path, but into a raw region with no maximum
    /// tracking.  The maximum falls out of the merge.
    fn accumulate_into<R: Rng>(&self, region: &mut [u32], limit: usize, samples: usize, rng: &mut R) {
        let viewport = self.plane.viewport;
        let re_dist = Uniform::new_inclusive(viewport.min.re, viewport.max.re);
        let im_dist = Uniform::new_inclusive(viewport.min.im, viewport.max.im);
        for _ in 0..samples {
            let sample = Complex::new(re_dist.sample(rng), im_dist.sample(rng));
            for point in trajectory(sample, limit) {
                if let Some(offset) = self.plane.point_to_offset(&point) {
                    region[offset] += 1;
                }
            }
        }
    }
}

/// The output of a generation run: three accumulated grids and the
/// single largest cell count seen across all of them.  Consuming
/// this is the only road to an image, which is what makes "normalize
/// before all channels finish" unrepresentable.
pub struct Rendered {
    /// Visit counters for the red channel.
    pub red: Heatmap,
    /// Visit counters for the green channel.
    pub green: Heatmap,
    /// Visit counters for the blue channel.
    pub blue: Heatmap,
    /// The largest count in any cell of any channel.
    pub max: u32,
}

impl Rendered {
    /// Rescale all three grids to 8-bit intensity against the shared
    /// maximum.  Fails when the run recorded no hits at all; an
    /// all-black image would only disguise a misconfigured viewport.
    pub fn normalize(self) -> Result<NebulaImage, Error> {
        let width = self.red.width();
        let height = self.red.height();
        let red = self.red.normalized(self.max, COLOR_DEPTH)?;
        let green = self.green.normalized(self.max, COLOR_DEPTH)?;
        let blue = self.blue.normalized(self.max, COLOR_DEPTH)?;
        Ok(NebulaImage {
            width,
            height,
            red,
            green,
            blue,
        })
    }
}

/// Three normalized channels, ready for serialization.  Every value
/// is already in `[0, 255]`.
pub struct NebulaImage {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Normalized red intensities, row-major.
    pub red: Vec<u8>,
    /// Normalized green intensities, row-major.
    pub green: Vec<u8>,
    /// Normalized blue intensities, row-major.
    pub blue: Vec<u8>,
}

// Tracks how far along the combined three-channel run is and prints
// a percentage on a coarse time cadence.  Purely observational.
struct Progress {
    total: u64,
    done: u64,
    next: Instant,
}

impl Progress {
    fn new(total: u64) -> Progress {
        Progress {
            total,
            done: 0,
            next: Instant::now() + FIRST_REPORT,
        }
    }

    fn tick(&mut self) {
        self.done += 1;
        if Instant::now() >= self.next {
            self.next = Instant::now() + REPORT_INTERVAL;
            info!(
                "estimated completion: {:.1}%",
                (self.done as f64) / (self.total as f64) * 100.0
            );
        }
    }
}
