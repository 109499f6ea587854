use anyhow::{ensure, Context};
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

use crate::{
    chunks::ihdr::IHDRChunk,
    filters::{filter_scanlines, reconstruct_scanlines, Filter},
    raster::IndexedImage,
};

/// Palette images are written unfiltered; prediction gains nothing on indices.
const PALETTE_FILTER: Filter = Filter::None;

pub(crate) fn compress_data(image: &IndexedImage, header: &IHDRChunk) -> Vec<u8> {
    let rows = pack_indices(image, header.bit_depth);
    let scanlines = filter_scanlines(&rows, header, PALETTE_FILTER);
    compress_to_vec_zlib(&scanlines, 9)
}

/// Inflates and unfilters the IDAT stream, returning one index per pixel.
pub(crate) fn decompress_data(
    compressed_data: &[u8],
    header: &IHDRChunk,
) -> anyhow::Result<Vec<u8>> {
    let data =
        decompress_to_vec_zlib(compressed_data).context("Failed to decompress image data.")?;
    let expected = header.scanline_size() * header.height as usize;
    ensure!(
        data.len() >= expected,
        "image data holds {} bytes, expected {expected}",
        data.len()
    );
    let rows = reconstruct_scanlines(&data[..expected], header)?;
    Ok(unpack_indices(&rows, header))
}

/// Packs indices MSB-first at `bit_depth` bits each, padding every row to a
/// whole byte.
pub(crate) fn pack_indices(image: &IndexedImage, bit_depth: u8) -> Vec<u8> {
    let per_byte = 8 / bit_depth as usize;
    let mut out = Vec::new();
    for row in image.rows() {
        for group in row.chunks(per_byte) {
            let byte = group.iter().enumerate().fold(0u8, |acc, (k, &index)| {
                let shift = 8 - bit_depth as usize * (k + 1);
                acc | (index << shift)
            });
            out.push(byte);
        }
    }
    out
}

pub(crate) fn unpack_indices(rows: &[u8], header: &IHDRChunk) -> Vec<u8> {
    let bit_depth = header.bit_depth as usize;
    let mask = ((1u16 << bit_depth) - 1) as u8;
    let width = header.width as usize;
    let mut out = Vec::with_capacity(width * header.height as usize);
    for row in rows.chunks(header.row_size()) {
        out.extend((0..width).map(|x| {
            let bit = x * bit_depth;
            let shift = 8 - bit_depth - bit % 8;
            (row[bit / 8] >> shift) & mask
        }));
    }
    out
}
