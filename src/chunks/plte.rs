use std::borrow::Cow;

use super::ParseableChunk;
use crate::pixel::Pixel;
use nom::{combinator::map, multi::count, number::complete::u8, sequence::tuple, IResult};

#[derive(Debug)]
pub(crate) struct PLTEChunk {
    colors: Vec<Pixel>,
}
impl PLTEChunk {
    pub(crate) fn new(colors: &[Pixel]) -> Self {
        Self {
            colors: colors.to_vec(),
        }
    }

    pub(crate) fn into_colors(self) -> Vec<Pixel> {
        self.colors
    }
}
impl<'a> ParseableChunk<'a> for PLTEChunk {
    const HEADER: &'static [u8; 4] = b"PLTE";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let entry_count = chunk_data.len() / 3;
        let (rest, colors) = count(
            map(tuple((u8, u8, u8)), |(r, g, b)| Pixel::new(r, g, b)),
            entry_count,
        )(chunk_data)?;
        Ok((rest, PLTEChunk { colors }))
    }

    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Owned(
            self.colors
                .iter()
                .flat_map(|c| [c.red, c.green, c.blue])
                .collect(),
        )
    }
}
