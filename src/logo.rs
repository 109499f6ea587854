//! The 16x16 striped logo: palette handling, painting and file output.

use std::{
    fs::File,
    io::{BufWriter, Write},
    num::IntErrorKind,
    path::Path,
};

use crate::{error::CommandError, pixel::Pixel, png::PNG, raster::IndexedImage};

pub const LOGO_SIZE: u32 = 16;
pub const LOGO_FILENAME: &str = "x16.png";

/// Four grey levels, background first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    levels: [u8; 4],
}
impl Default for Palette {
    fn default() -> Self {
        Self::new([255, 170, 85, 0])
    }
}
impl Palette {
    /// Palette slot painted on the stripes. Slots 2 and 3 are allocated but
    /// never painted.
    pub const STRIPE: usize = 1;

    pub fn new(levels: [u8; 4]) -> Self {
        Self { levels }
    }

    /// Builds the palette from the operands following `logo`: none for the
    /// defaults, or exactly four grey levels.
    pub fn from_args(args: &[String]) -> Result<Self, CommandError> {
        match args {
            [] => {
                log::info!("No colors given, using defaults ...");
                Ok(Self::default())
            }
            [c1, c2, c3, c4] => {
                let levels = [
                    parse_level(c1)?,
                    parse_level(c2)?,
                    parse_level(c3)?,
                    parse_level(c4)?,
                ];
                log::debug!("color levels: {levels:?}");
                Ok(Self::new(levels))
            }
            _ => Err(CommandError::ParamCount { given: args.len() }),
        }
    }

    pub fn levels(&self) -> [u8; 4] {
        self.levels
    }
}

fn parse_level(arg: &str) -> Result<u8, CommandError> {
    let value: i64 = arg.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CommandError::Range(arg.to_owned())
        }
        _ => CommandError::ParamFormat(arg.to_owned()),
    })?;
    u8::try_from(value).map_err(|_| CommandError::Range(arg.to_owned()))
}

/// Whether `(x, y)` lies on a stripe: every third column from 2 and every
/// third row from 1.
pub fn is_stripe(x: u32, y: u32) -> bool {
    (x as i32 - 2) % 3 == 0 || (y as i32 - 1) % 3 == 0
}

pub fn paint(palette: &Palette) -> IndexedImage {
    let mut image = IndexedImage::new(LOGO_SIZE, LOGO_SIZE);
    // A fresh image has room for all four, so these are 0..=3 in order.
    let handles: Vec<u8> = palette
        .levels()
        .into_iter()
        .filter_map(|level| image.allocate_color(Pixel::grey(level)))
        .collect();
    log::debug!("palette indices: {handles:?}");

    log::info!("Setting pixels ...");
    let stripe = handles[Palette::STRIPE];
    for x in 0..LOGO_SIZE {
        for y in 0..LOGO_SIZE {
            if is_stripe(x, y) {
                image.set_pixel(x, y, stripe);
            }
        }
    }
    image
}

/// Encodes `image` and writes it to `path`, replacing any existing file.
pub fn save(image: IndexedImage, path: &Path) -> Result<(), CommandError> {
    let png = PNG::new(image).map_err(CommandError::Image)?;
    let file = File::create(path).map_err(|source| CommandError::Open {
        path: path.to_owned(),
        source,
    })?;
    log::info!("Opened file ...");

    log::info!("Writing file ...");
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&png.encode())
        .and_then(|()| writer.flush())
        .map_err(|source| CommandError::Write {
            path: path.to_owned(),
            source,
        })
}
