use std::marker::PhantomData;

use anyhow::{anyhow, bail, ensure};
use nom::{bytes::complete::tag, IResult};

use crate::{
    chunks::{ihdr, iter_chunks, Chunk, ChunkIter},
    pixel::Pixel,
};

pub(crate) const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

/// Walks the chunk stream in the order PNG requires: IHDR, PLTE, IDAT...
pub(crate) struct PNGDecoder<'a, State>(ChunkIter<'a>, PhantomData<State>);

pub(crate) struct Start;
pub(crate) struct Header;
pub(crate) struct Palette;

impl<'a> PNGDecoder<'a, Start> {
    pub(crate) fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        let (rest, _) = parse_signature(data)
            .map_err(|_| anyhow!("input doesn't start with expected signature"))?;
        Ok(Self(iter_chunks(rest), PhantomData))
    }

    pub(crate) fn parse_ihdr(mut self) -> anyhow::Result<(PNGDecoder<'a, Header>, ihdr::IHDRChunk)> {
        match self.0.next().transpose()? {
            Some(Chunk::IHDR(header)) => {
                log::debug!("IHDR: {header:?}");
                Ok((PNGDecoder(self.0, PhantomData), header))
            }
            Some(other) => bail!("expected IHDR as first chunk, found {}", describe(&other)),
            None => bail!("no chunks after the signature"),
        }
    }
}

impl<'a> PNGDecoder<'a, Header> {
    pub(crate) fn parse_plte(mut self) -> anyhow::Result<(PNGDecoder<'a, Palette>, Vec<Pixel>)> {
        while let Some(chunk) = self.0.next().transpose()? {
            match chunk {
                Chunk::PLTE(plte) => {
                    let colors = plte.into_colors();
                    ensure!(
                        (1..=256).contains(&colors.len()),
                        "palette holds {} entries",
                        colors.len()
                    );
                    log::debug!("PLTE: {} entries", colors.len());
                    return Ok((PNGDecoder(self.0, PhantomData), colors));
                }
                Chunk::Unknown(raw) if raw.is_ancillary() => {
                    log::trace!("skipping {} before PLTE", raw.name());
                }
                other => bail!("expected PLTE, found {}", describe(&other)),
            }
        }
        bail!("Couldn't find a PLTE")
    }
}

impl<'a> PNGDecoder<'a, Palette> {
    /// Joins every IDAT up to IEND into one zlib stream.
    pub(crate) fn read_image_data(mut self) -> anyhow::Result<Vec<u8>> {
        let mut data = Vec::new();
        let mut idat_count = 0;
        while let Some(chunk) = self.0.next().transpose()? {
            match chunk {
                Chunk::IDAT(idat) => {
                    idat_count += 1;
                    data.extend_from_slice(idat.data);
                }
                Chunk::IEND => {
                    ensure!(idat_count > 0, "Couldn't find an IDAT");
                    log::debug!("{idat_count} IDAT chunk(s), {} bytes", data.len());
                    return Ok(data);
                }
                Chunk::Unknown(raw) if raw.is_ancillary() => {
                    log::trace!("skipping {}", raw.name());
                }
                other => bail!("unexpected {} in image data", describe(&other)),
            }
        }
        bail!("stream ended without IEND")
    }
}

fn describe(chunk: &Chunk<'_>) -> String {
    match chunk {
        Chunk::IHDR(_) => "IHDR".to_owned(),
        Chunk::PLTE(_) => "PLTE".to_owned(),
        Chunk::IDAT(_) => "IDAT".to_owned(),
        Chunk::IEND => "IEND".to_owned(),
        Chunk::Unknown(raw) => format!("critical chunk {}", raw.name()),
    }
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}
