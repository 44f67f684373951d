use palette::Srgb;

/// Ordered representative colors of an image; the first is the dominant one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Srgb<u8>>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    pub fn dominant(&self) -> Option<Srgb<u8>> {
        self.colors.first().copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `RRGGBB` strings, uppercase, in palette order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|&c| to_hex(c)).collect()
    }

    pub fn into_colors(self) -> Vec<Srgb<u8>> {
        self.colors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Srgb<u8>> {
        self.colors.iter()
    }
}

pub fn to_hex(c: Srgb<u8>) -> String {
    format!("{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

impl IntoIterator for Palette {
    type Item = Srgb<u8>;
    type IntoIter = std::vec::IntoIter<Srgb<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Srgb<u8>;
    type IntoIter = std::slice::Iter<'a, Srgb<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

impl From<Vec<Srgb<u8>>> for Palette {
    fn from(colors: Vec<Srgb<u8>>) -> Self {
        Self::new(colors)
    }
}
