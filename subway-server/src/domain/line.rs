//! Subway line display classification.

use std::fmt;

/// A display line: the color/symbol grouping for one or more routes.
///
/// Several route records can map to the same line (e.g. branch variants);
/// the enum order is the canonical display order used when listing the
/// lines serving a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Red,
    Orange,
    Blue,
    GreenB,
    GreenC,
    GreenD,
    GreenE,
    Mattapan,
}

impl Line {
    /// Short symbol shown on the station badge.
    pub fn symbol(&self) -> &'static str {
        match self {
            Line::Red => "RL",
            Line::Orange => "OL",
            Line::Blue => "BL",
            Line::GreenB => "GL-B",
            Line::GreenC => "GL-C",
            Line::GreenD => "GL-D",
            Line::GreenE => "GL-E",
            Line::Mattapan => "M",
        }
    }

    /// Human-readable line name.
    pub fn name(&self) -> &'static str {
        match self {
            Line::Red => "Red Line",
            Line::Orange => "Orange Line",
            Line::Blue => "Blue Line",
            Line::GreenB => "Green Line B",
            Line::GreenC => "Green Line C",
            Line::GreenD => "Green Line D",
            Line::GreenE => "Green Line E",
            Line::Mattapan => "Mattapan Trolley",
        }
    }

    /// Hex display color. The Mattapan trolley shares the Red Line color.
    pub fn color(&self) -> &'static str {
        match self {
            Line::Red | Line::Mattapan => "#DA291C",
            Line::Orange => "#ED8B00",
            Line::Blue => "#003DA5",
            Line::GreenB | Line::GreenC | Line::GreenD | Line::GreenE => "#00843D",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
