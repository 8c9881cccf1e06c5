//! True-color RGBA representation.

/// A 32-bit RGBA color.
///
/// Alpha participates in palette matching: colors with mismatched alpha
/// are never considered neighbors, so fully transparent pixels can only
/// map to transparent palette entries.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Create a new color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Create from a packed 32-bit ARGB value (e.g. `0xFF00FF00`).
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::new(
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        )
    }

    /// Pack into a 32-bit ARGB value.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Check if the color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Check if the color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<u32> for Rgba {
    /// Convert from a packed 32-bit ARGB value.
    #[inline]
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_roundtrip() {
        let color = Rgba::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(Rgba::from_argb(color.to_argb()), color);
        assert_eq!(Rgba::from_argb(0xFF00_00FF), Rgba::opaque(0, 0, 255));
    }

    #[test]
    fn test_opacity_predicates() {
        assert!(Rgba::WHITE.is_opaque());
        assert!(Rgba::TRANSPARENT.is_transparent());
        assert!(!Rgba::new(1, 2, 3, 128).is_opaque());
        assert!(!Rgba::new(1, 2, 3, 128).is_transparent());
    }
}
