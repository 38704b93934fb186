//! Pixel layout of the deployed sculpture
//!
//! A 34 pixel ring with three spokes hanging off it. The Venus spoke ends in
//! a cross, the Mars spoke in an arrow, and the Earth spoke carries both.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Edge, EdgeTypes, PixelGraph, PixelIndex, PixelMask};

/// Number of addressable pixels
pub const NUM_LEDS: usize = 78;

/// Graph of the deployed sculpture
pub type LedGraph = PixelGraph<NUM_LEDS>;

/// Ring pixels in clockwise order
pub const RING: [PixelIndex; 34] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, //
    30, 31, 32, 33, 34, 35, 36, 37, 38, //
    53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65,
];

const SPOKE_ROOTS: [(PixelIndex, PixelIndex); 3] = [(65, 66), (38, 39), (30, 12)];

const SPOKE_CHAINS: [(PixelIndex, PixelIndex); 3] = [(66, 73), (39, 46), (12, 19)];

const ARROW_EDGES: [(PixelIndex, PixelIndex); 12] = [
    (19, 20),
    (20, 21),
    (21, 22),
    (19, 25),
    (25, 24),
    (24, 23),
    (45, 47),
    (47, 48),
    (48, 49),
    (45, 52),
    (52, 51),
    (51, 50),
];

const CROSS_EDGES: [(PixelIndex, PixelIndex, EdgeTypes); 8] = [
    (14, 28, EdgeTypes::CLOCKWISE),
    (28, 29, EdgeTypes::CLOCKWISE),
    (14, 27, EdgeTypes::COUNTERCLOCKWISE),
    (27, 26, EdgeTypes::COUNTERCLOCKWISE),
    (70, 77, EdgeTypes::CLOCKWISE),
    (77, 76, EdgeTypes::CLOCKWISE),
    (70, 74, EdgeTypes::COUNTERCLOCKWISE),
    (74, 75, EdgeTypes::COUNTERCLOCKWISE),
];

const VENUS_PIXELS: [PixelIndex; 12] = [66, 67, 68, 69, 70, 71, 72, 73, 77, 76, 74, 75];
const VENUS_ARC: [PixelIndex; 9] = [0, 1, 2, 3, 65, 64, 63, 62, 61];
const VENUS_TIPS: [PixelIndex; 3] = [73, 76, 75];

const MARS_PIXELS: [PixelIndex; 14] = [39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 52, 51, 50];
const MARS_ARC: [PixelIndex; 9] = [38, 37, 36, 35, 34, 53, 54, 55, 56];
const MARS_TIPS: [PixelIndex; 3] = [46, 49, 50];

const EARTH_PIXELS: [PixelIndex; 18] = [
    12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 25, 24, 23, 28, 29, 27, 26,
];
const EARTH_ARC: [PixelIndex; 9] = [30, 11, 10, 9, 8, 31, 32, 33, 34];
const EARTH_TIPS: [PixelIndex; 4] = [22, 23, 29, 26];

/// Every spoke tip, used as spawn points for inbound flows
pub const SPOKE_TIPS: [PixelIndex; 10] = [73, 76, 75, 46, 49, 50, 22, 23, 29, 26];

/// One of the three touch-sensitive spokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Spoke {
    Venus = 0,
    Mars = 1,
    Earth = 2,
}

impl Spoke {
    pub const ALL: [Self; 3] = [Self::Venus, Self::Mars, Self::Earth];
    pub const COUNT: usize = 3;

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Venus,
            1 => Self::Mars,
            2 => Self::Earth,
            _ => return None,
        })
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Earth => "earth",
        }
    }

    /// Ring pixel the spoke hangs off
    pub const fn root(self) -> PixelIndex {
        SPOKE_ROOTS[self.index()].0
    }

    /// First pixel of the spoke itself
    pub const fn base(self) -> PixelIndex {
        SPOKE_ROOTS[self.index()].1
    }

    /// Pixels of the spoke and its symbol, ordered from the base outwards
    pub const fn pixels(self) -> &'static [PixelIndex] {
        match self {
            Self::Venus => &VENUS_PIXELS,
            Self::Mars => &MARS_PIXELS,
            Self::Earth => &EARTH_PIXELS,
        }
    }

    /// Ring pixels around the spoke root
    pub const fn arc(self) -> &'static [PixelIndex] {
        match self {
            Self::Venus => &VENUS_ARC,
            Self::Mars => &MARS_ARC,
            Self::Earth => &EARTH_ARC,
        }
    }

    /// Outermost pixels of the spoke symbol
    pub const fn tips(self) -> &'static [PixelIndex] {
        match self {
            Self::Venus => &VENUS_TIPS,
            Self::Mars => &MARS_TIPS,
            Self::Earth => &EARTH_TIPS,
        }
    }

    /// Spoke and arc pixels as a mask
    pub const fn mask(self) -> PixelMask {
        let spoke = PixelMask::from_pixels(self.pixels());
        let arc = PixelMask::from_pixels(self.arc());
        spoke.union(arc)
    }
}

impl PixelGraph<NUM_LEDS> {
    /// Build the graph of the deployed sculpture
    pub fn sculpture() -> Self {
        let mut graph = Self::new();

        for (i, &from) in RING.iter().enumerate() {
            let to = RING[(i + 1) % RING.len()];
            graph.add_checked(Edge::new(from, to, EdgeTypes::CLOCKWISE));
        }

        for (root, base) in SPOKE_ROOTS {
            graph.add_checked(Edge::new(root, base, EdgeTypes::OUTBOUND));
        }

        for (first, last) in SPOKE_CHAINS {
            for px in first..last {
                graph.add_checked(Edge::new(px, px + 1, EdgeTypes::OUTBOUND));
            }
        }

        for (from, to) in ARROW_EDGES {
            graph.add_checked(Edge::new(from, to, EdgeTypes::OUTBOUND));
        }

        for (from, to, types) in CROSS_EDGES {
            graph.add_checked(Edge::new(from, to, types));
        }

        graph
    }

    fn add_checked(&mut self, edge: Edge) {
        if let Err(_edge) = self.add_edge(edge, true) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[PixelGraph.sculpture] rejected edge {} -> {}",
                _edge.from, _edge.to
            );
            debug_assert!(false, "sculpture edge rejected");
        }
    }
}
