// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_a_wellformed_text_ppm() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("tiny.ppm");

    Command::cargo_bin("nebula")
        .unwrap()
        .args(&[
            "--output",
            outfile.to_str().unwrap(),
            "--size",
            "10x10",
            "--samples",
            "50",
            "--red-iterations",
            "50",
            "--green-iterations",
            "500",
            "--blue-iterations",
            "50",
            "--seed",
            "7",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&outfile).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "P3");
    assert_eq!(lines[1], "10 10");
    assert_eq!(lines[2], "255");
    assert_eq!(lines.len(), 3 + 10);
    for row in &lines[3..] {
        let values: Vec<u32> = row
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values.len(), 10 * 3);
        assert!(values.iter().all(|&v| v <= 255));
    }
}

#[test]
fn rejects_an_inverted_viewport() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("never.ppm");

    Command::cargo_bin("nebula")
        .unwrap()
        .args(&[
            "--output",
            outfile.to_str().unwrap(),
            "--leftlower",
            "1.0,1.0",
            "--rightupper",
            "-1.0,-1.0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));

    assert!(!outfile.exists());
}

#[test]
fn reports_a_viewport_with_no_escaping_samples() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("dark.ppm");

    Command::cargo_bin("nebula")
        .unwrap()
        .args(&[
            "--output",
            outfile.to_str().unwrap(),
            "--size",
            "4x4",
            "--samples",
            "2",
            "--leftlower",
            "-0.000000001,-0.000000001",
            "--rightupper",
            "0.000000001,0.000000001",
            "--red-iterations",
            "1000",
            "--green-iterations",
            "1000",
            "--blue-iterations",
            "1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no escaping samples"));

    assert!(!outfile.exists());
}

#[test]
fn rejects_unparseable_dimensions() {
    Command::cargo_bin("nebula")
        .unwrap()
        .args(&["--output", "out.ppm", "--size", "10by10"])
        .assert()
        .failure();
}
