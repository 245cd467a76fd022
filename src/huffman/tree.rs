// Huffman tree construction.
//
// Nodes live in an arena owned by `HuffmanTree` and refer to their children
// by `NodeId`. Every node except the root has exactly one parent, so the
// arena is a strict hierarchy with no sharing and no cycles.
//
// Two builders:
//   - `from_frequencies` (encode side): greedy merge of the two lightest
//     nodes using a min-priority queue with an explicit tie-break rule
//   - `from_code_table`  (decode side): trie insertion of each code path

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace};

use super::code_table::CodeTable;
use super::error::{HuffmanError, Result};
use super::frequency::FrequencyTable;

// ---------------------------------------------------------------------------
// Bits
// ---------------------------------------------------------------------------

/// One step of a root-to-leaf path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    /// `'0'`: descend left.
    Zero,
    /// `'1'`: descend right.
    One,
}

impl Bit {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Index of a node inside its `HuffmanTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    symbol: Option<char>,
    /// Combined frequency of the subtree. Zero in trees rebuilt from a
    /// code table.
    weight: u64,
    children: [Option<NodeId>; 2],
}

impl Node {
    fn leaf(symbol: char, weight: u64) -> Self {
        Self {
            symbol: Some(symbol),
            weight,
            children: [None, None],
        }
    }

    fn internal(weight: u64, left: NodeId, right: NodeId) -> Self {
        Self {
            symbol: None,
            weight,
            children: [Some(left), Some(right)],
        }
    }

    fn placeholder() -> Self {
        Self {
            symbol: None,
            weight: 0,
            children: [None, None],
        }
    }

    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn child(&self, bit: Bit) -> Option<NodeId> {
        self.children[bit.index()]
    }

    pub fn left(&self) -> Option<NodeId> {
        self.child(Bit::Zero)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.child(Bit::One)
    }

    /// A node is a leaf iff it has no children.
    pub fn is_leaf(&self) -> bool {
        self.children == [None, None]
    }
}

// ---------------------------------------------------------------------------
// Tie-break rule
// ---------------------------------------------------------------------------

/// Which node the priority queue yields first when weights are equal.
///
/// Nodes are numbered in creation order: leaves first in ascending character
/// order, then internal nodes in merge order. Any rule yields an optimal
/// code; different rules may yield different tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Earliest-created node first (stable, FIFO among equals).
    #[default]
    InsertionOrder,
    /// Most recently created node first (LIFO among equals).
    NewestFirst,
}

impl TieBreak {
    fn rank(self, id: NodeId) -> usize {
        match self {
            Self::InsertionOrder => id.0,
            Self::NewestFirst => usize::MAX - id.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Outcome of building from frequencies.
///
/// Alphabets of size 0 and 1 have no meaningful binary tree; they are
/// returned as their own variants so callers handle them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeShape {
    /// No characters at all.
    Empty,
    /// Exactly one distinct character.
    SingleSymbol(char),
    /// Two or more distinct characters.
    Tree(HuffmanTree),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build an optimal prefix-code tree from character frequencies.
    ///
    /// Repeatedly extracts the two lightest nodes `x` then `y` and pushes a
    /// new internal node with `left = x`, `right = y`, until one remains.
    pub fn from_frequencies(freq: &FrequencyTable, tie_break: TieBreak) -> TreeShape {
        let mut nodes = Vec::with_capacity((2 * freq.len()).saturating_sub(1));
        let mut queue = BinaryHeap::with_capacity(freq.len());

        for (ch, count) in freq.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node::leaf(ch, count));
            queue.push(Reverse((count, tie_break.rank(id), id)));
        }

        let root = loop {
            let Some(Reverse((x_weight, _, x))) = queue.pop() else {
                return TreeShape::Empty;
            };
            let Some(Reverse((y_weight, _, y))) = queue.pop() else {
                break x;
            };

            let weight = x_weight.saturating_add(y_weight);
            let id = NodeId(nodes.len());
            nodes.push(Node::internal(weight, x, y));
            trace!("merge {x:?} ({x_weight}) + {y:?} ({y_weight}) -> {id:?} ({weight})");
            queue.push(Reverse((weight, tie_break.rank(id), id)));
        };

        if let Some(ch) = nodes[root.0].symbol {
            debug!("single-symbol input {ch:?}, no tree built");
            return TreeShape::SingleSymbol(ch);
        }

        let tree = Self { nodes, root };
        debug!(
            "built tree: {} leaves, {} nodes, root weight {}, {tie_break:?}",
            freq.len(),
            tree.node_count(),
            tree.node(tree.root).weight
        );
        TreeShape::Tree(tree)
    }

    /// Rebuild a decoding tree from a code table.
    ///
    /// Each code is inserted as a path from the root, creating placeholder
    /// nodes as needed. Fails with `MalformedCodeTable` when the table is
    /// not prefix-free.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut tree = Self {
            nodes: vec![Node::placeholder()],
            root: NodeId(0),
        };

        for (ch, code) in table.iter() {
            let mut cursor = tree.root;
            for symbol in code.chars() {
                if let Some(owner) = tree.node(cursor).symbol {
                    return Err(HuffmanError::malformed(format!(
                        "code {code:?} for {ch:?} extends the code of {owner:?}"
                    )));
                }
                let bit = Bit::from_symbol(symbol).ok_or_else(|| {
                    HuffmanError::malformed(format!("code {code:?} for {ch:?} is not binary"))
                })?;
                cursor = match tree.node(cursor).child(bit) {
                    Some(next) => next,
                    None => {
                        let next = tree.push(Node::placeholder());
                        tree.nodes[cursor.0].children[bit.index()] = Some(next);
                        next
                    }
                };
            }

            let end = &mut tree.nodes[cursor.0];
            if cursor == tree.root {
                return Err(HuffmanError::malformed(format!("empty code for {ch:?}")));
            }
            if let Some(existing) = end.symbol {
                return Err(HuffmanError::malformed(format!(
                    "code {code:?} assigned to both {existing:?} and {ch:?}"
                )));
            }
            if !end.is_leaf() {
                return Err(HuffmanError::malformed(format!(
                    "code {code:?} for {ch:?} is a prefix of another code"
                )));
            }
            end.symbol = Some(ch);
        }

        debug!(
            "rebuilt decode tree: {} codes, {} nodes",
            table.len(),
            tree.node_count()
        );
        Ok(tree)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes, internal and leaf. Never zero: both builders
    /// create the root first.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.symbol.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
