//! Carousel ring
//!
//! The games form a ring with no designated head. Nodes are stored in a
//! `Vec` and neighbours are found with index arithmetic: the next node of
//! position `i` is `i + 1`, the previous one `i - 1`, both modulo the ring
//! length.

use crate::draw::Bitmap;

/// Position of a node in the ring.
///
/// Positions at or after an insertion point shift by one when a node is
/// inserted, so they should only be held once the ring is built.
pub type NodeIndex = usize;

/// A selectable carousel entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselNode {
    /// Image shown in the carousel slot
    pub button: Bitmap,
    /// Index of the game in the menu's game list
    pub game: usize,
}

/// Circular sequence of [`CarouselNode`]s.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    nodes: Vec<CarouselNode>,
    initial: Option<NodeIndex>,
}

impl Carousel {
    /// A ring holding just `first`.
    pub fn new(first: CarouselNode) -> Self {
        Self {
            nodes: vec![first],
            initial: Some(0),
        }
    }

    /// Builds a ring from an ordered list of nodes.
    ///
    /// The first node becomes the initial node. Each following node is
    /// inserted before the most recently inserted one, so walking
    /// [`previous`](Self::previous) from the initial node visits the nodes
    /// in their original order.
    pub fn from_nodes(nodes: impl IntoIterator<Item = CarouselNode>) -> Self {
        let mut nodes = nodes.into_iter();
        let Some(first) = nodes.next() else {
            return Self::default();
        };

        let mut ring = Self::new(first);
        let mut head = 0;
        for node in nodes {
            head = ring.insert_before(head, node);
        }
        ring
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node the menu starts on, `None` for an empty ring.
    pub fn initial(&self) -> Option<NodeIndex> {
        self.initial
    }

    pub fn node(&self, index: NodeIndex) -> Option<&CarouselNode> {
        self.nodes.get(index)
    }

    pub fn next(&self, index: NodeIndex) -> NodeIndex {
        if self.nodes.is_empty() {
            return index;
        }
        (index + 1) % self.nodes.len()
    }

    pub fn previous(&self, index: NodeIndex) -> NodeIndex {
        if self.nodes.is_empty() {
            return index;
        }
        (index + self.nodes.len() - 1) % self.nodes.len()
    }

    /// Splices `node` into the ring immediately before `at` and returns the
    /// new node's position. The node that was at `at` moves to `at + 1`.
    pub fn insert_before(&mut self, at: NodeIndex, node: CarouselNode) -> NodeIndex {
        let at = at.min(self.nodes.len());
        self.nodes.insert(at, node);
        match self.initial {
            Some(initial) if initial >= at => self.initial = Some(initial + 1),
            None => self.initial = Some(at),
            _ => {}
        }
        at
    }

    /// Walks the whole ring once through `previous` links, starting at `from`.
    pub fn walk_previous(&self, from: NodeIndex) -> impl Iterator<Item = &CarouselNode> + '_ {
        std::iter::successors(Some(from), move |&i| Some(self.previous(i)))
            .take(self.nodes.len())
            .filter_map(move |i| self.nodes.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BitmapId;

    fn node(game: usize) -> CarouselNode {
        CarouselNode {
            button: Bitmap::new(BitmapId(game as u64), 10, 10),
            game,
        }
    }

    fn ring_of(n: usize) -> Carousel {
        Carousel::from_nodes((0..n).map(node))
    }

    // =============================================================
    // Construction
    // =============================================================

    #[test]
    fn test_empty_ring() {
        let ring = ring_of(0);
        assert!(ring.is_empty());
        assert_eq!(ring.initial(), None);
        assert_eq!(ring.next(0), 0);
        assert_eq!(ring.previous(0), 0);
    }

    #[test]
    fn test_single_node_is_its_own_neighbour() {
        let ring = ring_of(1);
        let start = ring.initial().unwrap();
        assert_eq!(ring.next(start), start);
        assert_eq!(ring.previous(start), start);
    }

    #[test]
    fn test_walking_previous_preserves_original_order() {
        for n in 1..=6 {
            let ring = ring_of(n);
            let start = ring.initial().unwrap();
            let order: Vec<usize> = ring.walk_previous(start).map(|node| node.game).collect();
            assert_eq!(order, (0..n).collect::<Vec<_>>(), "ring of {}", n);
        }
    }

    #[test]
    fn test_ring_is_circular() {
        let ring = ring_of(5);
        let start = ring.initial().unwrap();
        let mut index = start;
        for _ in 0..5 {
            index = ring.previous(index);
        }
        assert_eq!(index, start);

        for _ in 0..5 {
            index = ring.next(index);
        }
        assert_eq!(index, start);
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        let ring = ring_of(4);
        for index in 0..ring.len() {
            assert_eq!(ring.previous(ring.next(index)), index);
            assert_eq!(ring.next(ring.previous(index)), index);
        }
    }

    // =============================================================
    // insert_before
    // =============================================================

    #[test]
    fn test_insert_before_links_both_ways() {
        let mut ring = Carousel::new(node(0));
        let a = ring.initial().unwrap();
        let b = ring.insert_before(a, node(1));
        let a = ring.initial().unwrap();

        assert_eq!(ring.previous(a), b);
        assert_eq!(ring.next(b), a);
        assert_eq!(ring.node(b).unwrap().game, 1);
    }

    #[test]
    fn test_insert_before_keeps_initial_node() {
        let mut ring = ring_of(3);
        let initial_game = ring.node(ring.initial().unwrap()).unwrap().game;

        ring.insert_before(0, node(9));

        let initial = ring.initial().unwrap();
        assert_eq!(ring.node(initial).unwrap().game, initial_game);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_insert_into_empty_ring() {
        let mut ring = Carousel::default();
        let index = ring.insert_before(3, node(7));
        assert_eq!(index, 0);
        assert_eq!(ring.initial(), Some(0));
    }
}
