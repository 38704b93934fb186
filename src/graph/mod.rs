//! Typed-edge adjacency graph over a fixed pixel index space
//!
//! Each pixel keeps a small, fixed-capacity list of outgoing edges. Edges carry
//! a set of [`EdgeTypes`] describing the topological direction of travel, so
//! flow rules can ask for "clockwise neighbours" or "anything inbound" without
//! knowing the physical layout.

mod mask;
pub mod topology;

use heapless::Vec;

pub use mask::PixelMask;
pub use topology::{LedGraph, NUM_LEDS, RING, SPOKE_TIPS, Spoke};

/// Maximum number of outgoing edges per pixel
pub const MAX_DEGREE: usize = 4;

/// Pixel index inside the graph
pub type PixelIndex = u16;

bitflags::bitflags! {
    /// Direction tags carried by an edge
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EdgeTypes: u8 {
        /// Toward the ring
        const INBOUND = 1 << 0;
        /// Away from the ring, down a spoke
        const OUTBOUND = 1 << 1;
        const CLOCKWISE = 1 << 2;
        const COUNTERCLOCKWISE = 1 << 3;
    }
}

impl EdgeTypes {
    /// Every direction
    pub const ANY: Self = Self::all();

    /// The direction set seen when walking the edge backwards
    pub const fn transpose(self) -> Self {
        let mut result = Self::empty();
        if self.contains(Self::INBOUND) {
            result = result.union(Self::OUTBOUND);
        }
        if self.contains(Self::OUTBOUND) {
            result = result.union(Self::INBOUND);
        }
        if self.contains(Self::CLOCKWISE) {
            result = result.union(Self::COUNTERCLOCKWISE);
        }
        if self.contains(Self::COUNTERCLOCKWISE) {
            result = result.union(Self::CLOCKWISE);
        }
        result
    }
}

/// Two direction tiers, the second one optional
///
/// Used both as the direction preference of a bit (first tier is preferred)
/// and as a query mask (an edge matches if it matches either tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeTypesPair {
    pub first: EdgeTypes,
    pub second: EdgeTypes,
}

impl EdgeTypesPair {
    pub const fn new(first: EdgeTypes, second: EdgeTypes) -> Self {
        Self { first, second }
    }

    pub const fn single(first: EdgeTypes) -> Self {
        Self {
            first,
            second: EdgeTypes::empty(),
        }
    }

    /// Union of both tiers
    pub const fn combined(self) -> EdgeTypes {
        self.first.union(self.second)
    }

    /// Non-empty tiers in priority order
    pub fn tiers(self) -> impl Iterator<Item = EdgeTypes> {
        [self.first, self.second]
            .into_iter()
            .filter(|tier| !tier.is_empty())
    }
}

impl From<EdgeTypes> for EdgeTypesPair {
    fn from(types: EdgeTypes) -> Self {
        Self::single(types)
    }
}

/// A directed connection between two pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: PixelIndex,
    pub to: PixelIndex,
    pub types: EdgeTypes,
}

impl Edge {
    pub const fn new(from: PixelIndex, to: PixelIndex, types: EdgeTypes) -> Self {
        Self { from, to, types }
    }

    /// Reverse edge with transposed direction tags
    pub const fn transpose(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            types: self.types.transpose(),
        }
    }
}

/// Adjacency list of a single pixel
pub type Adjacency = Vec<Edge, MAX_DEGREE>;

/// Static typed-edge adjacency graph over `N` pixels
#[derive(Debug, Clone)]
pub struct PixelGraph<const N: usize> {
    adjacency: [Adjacency; N],
}

impl<const N: usize> PixelGraph<N> {
    pub const fn new() -> Self {
        Self {
            adjacency: [const { Vec::new() }; N],
        }
    }

    /// Number of pixels in the graph
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Insert an edge, plus its transposed reverse when `bidirectional`
    ///
    /// Nothing is inserted if an endpoint is out of range or an adjacency
    /// list would exceed [`MAX_DEGREE`]; the edge is handed back instead.
    pub fn add_edge(&mut self, edge: Edge, bidirectional: bool) -> Result<(), Edge> {
        let from = usize::from(edge.from);
        let to = usize::from(edge.to);
        if from >= N || to >= N {
            return Err(edge);
        }

        let needed_at_from = if bidirectional && from == to { 2 } else { 1 };
        if self.adjacency[from].len() + needed_at_from > MAX_DEGREE {
            return Err(edge);
        }
        if bidirectional && from != to && self.adjacency[to].is_full() {
            return Err(edge);
        }

        self.adjacency[from].push(edge)?;
        if bidirectional {
            self.adjacency[to].push(edge.transpose()).map_err(|_| edge)?;
        }
        Ok(())
    }

    /// All outgoing edges of `node`
    pub fn edges(&self, node: PixelIndex) -> &[Edge] {
        match self.adjacency.get(usize::from(node)) {
            Some(list) => list,
            None => {
                debug_assert!(false, "pixel {node} out of range");
                &[]
            }
        }
    }

    /// Outgoing edges of `node` whose types intersect `mask`
    ///
    /// A pair mask matches an edge if either tier intersects it.
    pub fn adjacencies(&self, node: PixelIndex, mask: impl Into<EdgeTypesPair>) -> Adjacency {
        let mask = mask.into().combined();
        self.edges(node)
            .iter()
            .filter(|edge| edge.types.intersects(mask))
            .copied()
            .collect()
    }

    /// Number of outgoing edges of `node`
    pub fn degree(&self, node: PixelIndex) -> usize {
        self.edges(node).len()
    }
}

impl<const N: usize> Default for PixelGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}
