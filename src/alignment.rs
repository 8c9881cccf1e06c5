//! Anchor alignment for components positioned relative to a base point.

/// Vertical anchor of a component relative to its base position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// The base position is the top edge.
    Top,
    /// The base position is the vertical center.
    Center,
    /// The base position is the bottom edge.
    Bottom,
}

/// Horizontal anchor of a component relative to its base position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// The base position is the left edge.
    Left,
    /// The base position is the horizontal center.
    Center,
    /// The base position is the right edge.
    Right,
}

/// A combined vertical/horizontal anchor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Top edge, left edge.
    TopLeft,
    /// Top edge, horizontal center.
    TopCenter,
    /// Top edge, right edge.
    TopRight,
    /// Vertical center, left edge.
    CenterLeft,
    /// Vertical center, horizontal center.
    Center,
    /// Vertical center, right edge.
    CenterRight,
    /// Bottom edge, left edge.
    BottomLeft,
    /// Bottom edge, horizontal center.
    BottomCenter,
    /// Bottom edge, right edge.
    BottomRight,
}

impl Alignment {
    /// The vertical half of the anchor pair.
    pub const fn vertical(self) -> VerticalAlignment {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VerticalAlignment::Top,
            Self::CenterLeft | Self::Center | Self::CenterRight => VerticalAlignment::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VerticalAlignment::Bottom,
        }
    }

    /// The horizontal half of the anchor pair.
    pub const fn horizontal(self) -> HorizontalAlignment {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => HorizontalAlignment::Left,
            Self::TopCenter | Self::Center | Self::BottomCenter => HorizontalAlignment::Center,
            Self::TopRight | Self::CenterRight | Self::BottomRight => HorizontalAlignment::Right,
        }
    }
}
