use std::borrow::Cow;

use super::ParseableChunk;
use nom::IResult;

/// One slice of the zlib stream. A decoder concatenates every IDAT in order.
#[derive(Debug)]
pub(crate) struct IDATChunk<'a> {
    pub(crate) data: &'a [u8],
}
impl<'a> ParseableChunk<'a> for IDATChunk<'a> {
    const HEADER: &'static [u8; 4] = b"IDAT";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&[u8], Self> {
        Ok((&chunk_data[0..0], IDATChunk { data: chunk_data }))
    }

    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.data)
    }
}
