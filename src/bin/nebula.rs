// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate nebulabrot;
extern crate num;
extern crate num_cpus;
extern crate rand;

use clap::{App, Arg, ArgMatches};
use num::Complex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use nebulabrot::{ppm, NebulaRenderer, Viewport};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const SAMPLES: &str = "samples";
const RED: &str = "red-iterations";
const GREEN: &str = "green-iterations";
const BLUE: &str = "blue-iterations";
const THREADS: &str = "threads";
const SEED: &str = "seed";

fn iteration_arg(name: &'static str, short: &'static str, default: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .required(false)
        .long(name)
        .short(short)
        .takes_value(true)
        .default_value(default)
        .validator(move |s| {
            validate_range(
                &s,
                1usize,
                200_000,
                "Could not parse iteration count",
                "Iteration count must be between 1 and 200000",
            )
        })
        .help("Iteration ceiling for this channel")
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("nebula")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Three-channel Buddhabrot (Nebulabrot) renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (text PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the viewport"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the viewport"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("p")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        100_000,
                        "Could not parse samples-per-pixel",
                        "Samples-per-pixel must be between 1 and 100000",
                    )
                })
                .help("Random samples drawn per pixel, per channel"),
        )
        .arg(iteration_arg(RED, "R", "5000"))
        .arg(iteration_arg(GREEN, "G", "500"))
        .arg(iteration_arg(BLUE, "B", "50"))
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of worker threads"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        0u64,
                        u64::max_value(),
                        "Could not parse seed",
                        "Seed must be a non-negative integer",
                    )
                })
                .help("Random seed; derived from the clock when omitted"),
        )
        .get_matches()
}

fn clock_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()),
        Err(_) => 0,
    }
}

fn main() {
    env_logger::init();
    let matches = args();

    let image_size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap())
        .expect("Error parsing left lower point");
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap())
        .expect("Error parsing right upper point");
    let samples = usize::from_str(matches.value_of(SAMPLES).unwrap())
        .expect("Could not parse samples-per-pixel");
    let red = usize::from_str(matches.value_of(RED).unwrap())
        .expect("Could not parse red iteration count");
    let green = usize::from_str(matches.value_of(GREEN).unwrap())
        .expect("Could not parse green iteration count");
    let blue = usize::from_str(matches.value_of(BLUE).unwrap())
        .expect("Could not parse blue iteration count");
    let threads = usize::from_str(matches.value_of(THREADS).unwrap())
        .expect("Could not parse thread count");
    let seed = match matches.value_of(SEED) {
        Some(s) => u64::from_str(s).expect("Could not parse seed"),
        None => clock_seed(),
    };

    let viewport = match Viewport::new(leftlower, rightupper) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };
    let renderer = match NebulaRenderer::new(
        image_size.0,
        image_size.1,
        samples,
        viewport,
        (red, green, blue),
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    let rendered = if threads > 1 {
        match renderer.generate_threaded(threads, seed) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Render failure: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        renderer.generate(&mut StdRng::seed_from_u64(seed))
    };

    let image = match rendered.normalize() {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    let outfile = matches.value_of(OUTPUT).unwrap();
    let result = File::create(outfile).and_then(|file| {
        let mut out = BufWriter::new(file);
        ppm::write_ppm(&mut out, &image)?;
        out.flush()
    });
    if let Err(e) = result {
        eprintln!("Could not write {}: {}", outfile, e);
        std::process::exit(1);
    }
}
