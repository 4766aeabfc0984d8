// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text PPM (P3) emission.  A header naming the format, the
//! dimensions, and the channel ceiling, then one line per image row
//! of space-separated red, green, blue triples.  Pure formatting over
//! already-normalized grids; nothing in here thinks.

use std::io::{self, Write};

use itertools::Itertools;

use nebula::{NebulaImage, COLOR_DEPTH};

/// Serialize an image as text PPM into any writer.
pub fn write_ppm<W: Write>(out: &mut W, image: &NebulaImage) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "{}", COLOR_DEPTH)?;
    for row in 0..image.height {
        let start = row * image.width;
        let end = start + image.width;
        let line = image.red[start..end]
            .iter()
            .zip(&image.green[start..end])
            .zip(&image.blue[start..end])
            .map(|((r, g), b)| format!("{} {} {}", r, g, b))
            .join(" ");
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Serialize an image as text PPM into a fresh byte buffer.
pub fn encode(image: &NebulaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    write_ppm(&mut buffer, image).unwrap();
    buffer
}
