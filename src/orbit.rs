// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time trajectory generator, the innermost kernel of the
//! whole exercise.  A Buddhabrot doesn't care *that* a point escapes,
//! it cares where the point went on the way out.

use num::Complex;

/// A point whose squared magnitude exceeds this has left the disc of
/// radius two and is never coming back.
const ESCAPE_THRESHOLD: f64 = 4.0;

/// Iterate z ← z² + start up to `limit` times, collecting each
/// iterate, and stop as soon as the orbit escapes the disc of radius
/// two.  The escaping iterate itself is kept; it is the last stop on
/// the way out and it still gets plotted.
///
/// If the budget runs dry without an escape, the starting point is
/// presumed to be interior to the Mandelbrot set and the whole orbit
/// is discarded: the result is empty and contributes nothing to the
/// heatmap.  A zero budget is therefore an immediate "bounded."
pub fn trajectory(start: Complex<f64>, limit: usize) -> Vec<Complex<f64>> {
    let mut orbit: Vec<Complex<f64>> = Vec::with_capacity(limit.min(64));
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for _ in 0..limit {
        z = z * z + start;
        orbit.push(z);
        if z.norm_sqr() > ESCAPE_THRESHOLD {
            return orbit;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        assert!(trajectory(Complex::new(0.0, 0.0), 1).is_empty());
        assert!(trajectory(Complex::new(0.0, 0.0), 5000).is_empty());
    }

    #[test]
    fn interior_points_are_discarded() {
        // -1 + 0i cycles between -1 and 0 forever.
        assert!(trajectory(Complex::new(-1.0, 0.0), 10_000).is_empty());
    }

    #[test]
    fn far_points_escape_immediately() {
        let orbit = trajectory(Complex::new(3.0, 0.0), 10);
        assert_eq!(orbit.len(), 1);
        assert!(orbit[0].norm_sqr() > ESCAPE_THRESHOLD);
    }

    #[test]
    fn orbits_never_exceed_the_budget() {
        for budget in 1..20 {
            let orbit = trajectory(Complex::new(0.3, 0.6), budget);
            assert!(orbit.len() <= budget);
        }
    }

    #[test]
    fn escaping_orbits_end_with_the_escape_point() {
        let orbit = trajectory(Complex::new(0.3, 0.6), 1000);
        assert!(!orbit.is_empty());
        let last = orbit[orbit.len() - 1];
        assert!(last.norm_sqr() > ESCAPE_THRESHOLD);
        // Every earlier iterate was still inside.
        for z in &orbit[..orbit.len() - 1] {
            assert!(z.norm_sqr() <= ESCAPE_THRESHOLD);
        }
    }

    #[test]
    fn zero_budget_is_bounded() {
        assert!(trajectory(Complex::new(3.0, 0.0), 0).is_empty());
    }

    #[test]
    fn escape_on_the_final_iteration_still_counts() {
        // Find a point that escapes at exactly some n, then hand it a
        // budget of exactly n; the orbit must still come back.
        let c = Complex::new(0.3, 0.6);
        let n = trajectory(c, 1000).len();
        assert!(n > 1);
        assert_eq!(trajectory(c, n).len(), n);
    }
}
