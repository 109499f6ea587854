use anyhow::anyhow;

use crate::chunks::ihdr::IHDRChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}
impl Filter {
    /// `a` is the byte to the left, `b` the byte above, `c` above-left.
    pub(crate) fn filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => x,
            Filter::Sub => x.wrapping_sub(a),
            Filter::Up => x.wrapping_sub(b),
            Filter::Average => x.wrapping_sub(average(a, b)),
            Filter::Paeth => x.wrapping_sub(paeth(a, b, c)),
        }
    }

    pub(crate) fn reconstruct(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => x,
            Filter::Sub => x.wrapping_add(a),
            Filter::Up => x.wrapping_add(b),
            Filter::Average => x.wrapping_add(average(a, b)),
            Filter::Paeth => x.wrapping_add(paeth(a, b, c)),
        }
    }
}
impl TryFrom<u8> for Filter {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            i => Err(anyhow!("unknown filter type {i}")),
        }
    }
}

fn average(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Filters every row of `rows` with `filter`, each behind its filter-type byte.
pub(crate) fn filter_scanlines(rows: &[u8], header: &IHDRChunk, filter: Filter) -> Vec<u8> {
    let row_size = header.row_size();
    let bpp = header.filter_width() as usize;
    let mut out = Vec::with_capacity(header.scanline_size() * header.height as usize);
    let mut previous: &[u8] = &[];
    for row in rows.chunks(row_size) {
        out.push(filter as u8);
        for (i, &x) in row.iter().enumerate() {
            let (a, b, c) = neighbours(row, previous, i, bpp);
            out.push(filter.filter(x, a, b, c));
        }
        previous = row;
    }
    out
}

/// Undoes per-row filtering and strips the filter bytes.
pub(crate) fn reconstruct_scanlines(data: &[u8], header: &IHDRChunk) -> anyhow::Result<Vec<u8>> {
    let row_size = header.row_size();
    let bpp = header.filter_width() as usize;
    let mut out: Vec<u8> = Vec::with_capacity(row_size * header.height as usize);
    for (line, scanline) in data.chunks(header.scanline_size()).enumerate() {
        let (&filter_type, filtered) = scanline
            .split_first()
            .ok_or_else(|| anyhow!("empty scanline {line}"))?;
        let filter = Filter::try_from(filter_type)?;
        let start = out.len();
        let previous_start = start.saturating_sub(row_size);
        for (i, &x) in filtered.iter().enumerate() {
            let (done, current) = out.split_at(start);
            let previous = if line == 0 {
                &[][..]
            } else {
                &done[previous_start..]
            };
            let (a, b, c) = neighbours(current, previous, i, bpp);
            let value = filter.reconstruct(x, a, b, c);
            out.push(value);
        }
    }
    Ok(out)
}

fn neighbours(current: &[u8], previous: &[u8], i: usize, bpp: usize) -> (u8, u8, u8) {
    let at = |row: &[u8], i: usize| row.get(i).copied().unwrap_or(0);
    let b = at(previous, i);
    match i.checked_sub(bpp) {
        Some(left) => (at(current, left), b, at(previous, left)),
        None => (0, b, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: [u8; 12] = [10, 200, 30, 44, 12, 250, 31, 40, 0, 255, 128, 7];

    fn header() -> IHDRChunk {
        IHDRChunk::indexed(4, 3, 8)
    }

    #[test]
    fn every_filter_reconstructs_its_input() {
        for filter in [
            Filter::None,
            Filter::Sub,
            Filter::Up,
            Filter::Average,
            Filter::Paeth,
        ] {
            let filtered = filter_scanlines(&ROWS, &header(), filter);
            assert_eq!(filtered.len(), 15);
            assert_eq!(filtered[0], filter as u8);
            let restored = reconstruct_scanlines(&filtered, &header()).unwrap();
            assert_eq!(restored, ROWS, "{filter:?}");
        }
    }

    #[test]
    fn sub_filter_stores_differences() {
        let filtered = filter_scanlines(&ROWS[..4], &IHDRChunk::indexed(4, 1, 8), Filter::Sub);
        assert_eq!(filtered, [1, 10, 190, 86, 14]);
    }

    #[test]
    fn paeth_predictor_prefers_left_on_ties() {
        assert_eq!(paeth(5, 5, 5), 5);
        assert_eq!(paeth(10, 20, 10), 20);
        assert_eq!(paeth(20, 10, 10), 20);
        assert_eq!(paeth(0, 0, 100), 0);
    }

    #[test]
    fn unknown_filter_type_fails() {
        let data = [7, 1, 2, 3, 4];
        assert!(reconstruct_scanlines(&data, &IHDRChunk::indexed(4, 1, 8)).is_err());
    }
}
