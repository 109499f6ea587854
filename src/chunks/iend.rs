use std::borrow::Cow;

use super::ParseableChunk;

pub(crate) struct IENDChunk;
impl<'a> ParseableChunk<'a> for IENDChunk {
    const HEADER: &'static [u8; 4] = b"IEND";

    fn from_bytes(chunk_data: &[u8]) -> nom::IResult<&[u8], Self> {
        Ok((chunk_data, Self))
    }

    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[])
    }
}
