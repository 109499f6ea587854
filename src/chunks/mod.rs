use std::borrow::Cow;

use nom::{
    bytes::complete::{tag, take},
    combinator::{map, map_opt},
    multi::length_data,
    number::complete::be_u32,
    sequence::{terminated, tuple},
    IResult,
};

mod crc;
pub(crate) mod idat;
pub(crate) mod iend;
pub(crate) mod ihdr;
pub(crate) mod plte;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub(crate) enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    PLTE(plte::PLTEChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

pub(crate) fn iter_chunks(source: &[u8]) -> ChunkIter {
    ChunkIter {
        source,
        finished: false,
    }
}

pub(crate) struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(anyhow::Error::new(e.to_owned()).context("malformed chunk")))
            }
        }
    }
}

pub(crate) fn parse_chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (rest, (header, chunk_data)) = valid_chunk(input)?;
    match header {
        ihdr::IHDRChunk::HEADER => Ok((
            rest,
            Chunk::IHDR(ihdr::IHDRChunk::from_bytes(chunk_data)?.1),
        )),
        plte::PLTEChunk::HEADER => Ok((
            rest,
            Chunk::PLTE(plte::PLTEChunk::from_bytes(chunk_data)?.1),
        )),
        idat::IDATChunk::HEADER => Ok((
            rest,
            Chunk::IDAT(idat::IDATChunk::from_bytes(chunk_data)?.1),
        )),
        iend::IENDChunk::HEADER => Ok((rest, Chunk::IEND)),
        _ => Ok((
            rest,
            Chunk::Unknown(RawChunk {
                chunk_type: header,
                _chunk_data: chunk_data,
            }),
        )),
    }
}

#[derive(Debug)]
pub(crate) struct RawChunk<'a> {
    chunk_type: &'a [u8; 4],
    _chunk_data: &'a [u8],
}
impl<'a> RawChunk<'a> {
    pub(crate) fn name(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.chunk_type)
    }

    /// Bit 5 of the first type byte marks a chunk decoders may skip.
    pub(crate) fn is_ancillary(&self) -> bool {
        self.chunk_type[0] & 0x20 != 0
    }
}

/// Splits off one chunk, checking its CRC, and yields its type and data.
fn valid_chunk<'a, Error: nom::error::ParseError<&'a [u8]>>(
    input: &'a [u8],
) -> IResult<&'a [u8], (&'a [u8; 4], &'a [u8]), Error> {
    let (header_length, crc_length) = (4, 4);
    let (input, chunk_data) = length_data(map_opt(be_u32, |v: u32| {
        v.checked_add(header_length + crc_length)
    }))(input)?;
    let crc = crc::calculate_crc(
        chunk_data[0..chunk_data.len() - crc_length as usize]
            .iter()
            .copied(),
    )
    .to_be_bytes();
    let (_, data) = tuple((
        map(take(header_length), |v: &[u8]| {
            v.try_into().expect("4 bytes should have been taken")
        }),
        terminated(
            take(chunk_data.len() - (header_length + crc_length) as usize),
            tag(crc),
        ),
    ))(chunk_data)?;
    Ok((input, data))
}

/// Frames `data` as a chunk: length, type, data, CRC over type and data.
pub(crate) fn write_chunk(header: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() + 12);
    bytes.extend((data.len() as u32).to_be_bytes());
    bytes.extend(header);
    bytes.extend(data);
    let crc = crc::calculate_crc(bytes[4..].iter().copied()).to_be_bytes();
    bytes.extend(crc);
    bytes
}

pub(crate) trait ParseableChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn payload(&self) -> Cow<'_, [u8]>;

    fn to_bytes(&self) -> Vec<u8> {
        write_chunk(Self::HEADER, &self.payload())
    }
}
