/// One palette entry. PNG palettes carry no alpha, so neither does this.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}
impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Equal-channel grey of the given intensity.
    pub fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }

    pub fn is_grey(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }
}
