use anyhow::{bail, ensure, Context};

use crate::{
    chunks::{
        idat::IDATChunk, iend::IENDChunk, ihdr::ColorType, ihdr::IHDRChunk, ihdr::Interlacing,
        plte::PLTEChunk, ParseableChunk,
    },
    decoder::{PNGDecoder, SIGNATURE},
    image_data::{compress_data, decompress_data},
    raster::IndexedImage,
};

/// An indexed-color PNG: header plus the raster it describes.
#[derive(Debug)]
pub struct PNG {
    header: IHDRChunk,
    image: IndexedImage,
}

impl PNG {
    /// Wraps `image` for encoding, picking the narrowest bit depth that can
    /// address its whole palette.
    pub fn new(image: IndexedImage) -> anyhow::Result<Self> {
        ensure!(
            image.width() > 0 && image.height() > 0,
            "image must not be empty ({}x{})",
            image.width(),
            image.height()
        );
        ensure!(!image.palette().is_empty(), "image has no colors allocated");
        let colors = image.palette().len();
        if let Some(index) = image.indices().iter().find(|&&i| i as usize >= colors) {
            bail!("pixel index {index} is outside the {colors}-entry palette");
        }
        let header = IHDRChunk::indexed(image.width(), image.height(), bit_depth_for(colors));
        Ok(Self { header, image })
    }

    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let decoder = PNGDecoder::new(bytes)?;
        let (decoder, header) = decoder.parse_ihdr()?;
        ensure!(
            header.color_type == ColorType::IndexedColor,
            "only indexed-color images are supported, found {:?}",
            header.color_type
        );
        ensure!(
            matches!(header.bit_depth, 1 | 2 | 4 | 8),
            "invalid bit depth {} for an indexed image",
            header.bit_depth
        );
        ensure!(
            header.interlace_method == Interlacing::None,
            "interlaced images are not supported"
        );
        ensure!(
            header.width > 0 && header.height > 0,
            "image must not be empty ({}x{})",
            header.width,
            header.height
        );
        let (decoder, palette) = decoder.parse_plte()?;
        let compressed = decoder.read_image_data()?;
        let indices = decompress_data(&compressed, &header)
            .with_context(|| format!("Failed to read {}x{} image", header.width, header.height))?;
        let image = IndexedImage::from_parts(header.width, header.height, palette, indices);
        Ok(Self { header, image })
    }

    pub fn encode(&self) -> Vec<u8> {
        let compressed = compress_data(&self.image, &self.header);
        let mut bytes = SIGNATURE.to_vec();
        bytes.extend(self.header.to_bytes());
        bytes.extend(PLTEChunk::new(self.image.palette()).to_bytes());
        bytes.extend(IDATChunk { data: &compressed }.to_bytes());
        bytes.extend(IENDChunk.to_bytes());
        bytes
    }

    pub fn bit_depth(&self) -> u8 {
        self.header.bit_depth
    }

    pub fn into_image(self) -> IndexedImage {
        self.image
    }
}

fn bit_depth_for(colors: usize) -> u8 {
    match colors {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}
