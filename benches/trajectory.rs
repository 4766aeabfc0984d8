// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate nebulabrot;
extern crate num;

use criterion::Criterion;
use num::Complex;

use nebulabrot::trajectory;

// The bounded case is the expensive one: it always burns the entire
// iteration budget before giving up.
fn bench_trajectory(c: &mut Criterion) {
    c.bench_function("trajectory escaping", |b| {
        b.iter(|| trajectory(Complex::new(0.3, 0.6), 1000))
    });
    c.bench_function("trajectory bounded", |b| {
        b.iter(|| trajectory(Complex::new(-1.0, 0.0), 1000))
    });
}

criterion_group!(benches, bench_trajectory);
criterion_main!(benches);
