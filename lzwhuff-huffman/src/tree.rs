//! Huffman tree construction and bit-serial decoding.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! tree can be walked without recursion no matter how deep it gets.
//!
//! # Construction
//!
//! Leaves are created for every nonzero symbol in ascending symbol order.
//! A min-heap ordered by `(weight, creation_index)` repeatedly yields the two
//! lightest nodes; the first one popped becomes the left child of a new
//! internal node. Because every node's arena index is its creation index,
//! equal weights always resolve the same way and the same frequency table
//! always produces the same tree.

use crate::frequency::FrequencyTable;
use lzwhuff_core::bitstream::BitReader;
use lzwhuff_core::error::{LzwHuffError, Result};
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node in the Huffman arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    /// Terminal node carrying a symbol.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Interior node; `left` is reached by bit 0, `right` by bit 1.
    Internal {
        /// Child for bit 0.
        left: usize,
        /// Child for bit 1.
        right: usize,
        /// Sum of the children's weights.
        weight: u64,
    },
}

impl HuffmanNode {
    /// Weight of the subtree rooted here.
    pub fn weight(&self) -> u64 {
        match *self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => weight,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Where the decoder is while walking the tree.
#[derive(Debug, Clone, Copy)]
enum DecodeState {
    AtRoot,
    Descending(usize),
}

/// Huffman tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// # Errors
    ///
    /// [`LzwHuffError::EmptyTree`] if every count is zero.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let distinct = frequencies.distinct();
        if distinct == 0 {
            return Err(LzwHuffError::EmptyTree);
        }

        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        let mut heap = BinaryHeap::with_capacity(distinct);

        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse((weight, nodes.len())));
            nodes.push(HuffmanNode::Leaf { symbol, weight });
        }

        while let (Some(Reverse((w1, left))), Some(Reverse((w2, right)))) = (heap.pop(), heap.pop())
        {
            let weight = w1.saturating_add(w2);
            heap.push(Reverse((weight, nodes.len())));
            nodes.push(HuffmanNode::Internal {
                left,
                right,
                weight,
            });
        }

        // The loop exits after popping the last node alone; it is the root.
        let root = nodes.len() - 1;
        let tree = Self { nodes, root };

        debug!(
            "Huffman tree built: {} symbols, {} nodes, depth {}",
            distinct,
            tree.nodes.len(),
            tree.depth()
        );

        Ok(tree)
    }

    /// Arena index of the root node.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Node at `index`, if any.
    pub fn node(&self, index: usize) -> Option<&HuffmanNode> {
        self.nodes.get(index)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Total weight, equal to the number of symbols the table counted.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                HuffmanNode::Leaf { .. } => max = max.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max
    }

    /// Decode the first `bit_len` bits of `data` into symbols.
    ///
    /// Each bit moves one step from the current node; reaching a leaf emits
    /// its symbol and restarts at the root. A tree that is a single leaf
    /// reads every `0` bit as one occurrence of that symbol.
    ///
    /// # Errors
    ///
    /// - [`LzwHuffError::InvalidBitLength`] if `bit_len` exceeds the data
    /// - [`LzwHuffError::InvalidHuffmanCode`] for a bit that leads to no node
    /// - [`LzwHuffError::TruncatedStream`] if the bits end inside a code
    pub fn decode(&self, data: &[u8], bit_len: u64) -> Result<Vec<u8>> {
        let mut reader = BitReader::with_bit_len(data, bit_len)?;
        let mut output = Vec::with_capacity(data.len() * 2);
        let mut state = DecodeState::AtRoot;

        while !reader.is_exhausted() {
            let position = reader.bit_position();
            let bit = reader.read_bit()?;
            let current = match state {
                DecodeState::AtRoot => self.root,
                DecodeState::Descending(index) => index,
            };

            let next = match self.nodes[current] {
                HuffmanNode::Internal { left, right, .. } => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                // Only reachable when the root itself is a leaf
                HuffmanNode::Leaf { symbol, .. } => {
                    if bit {
                        return Err(LzwHuffError::invalid_huffman(position));
                    }
                    output.push(symbol);
                    continue;
                }
            };

            state = match self.nodes[next] {
                HuffmanNode::Leaf { symbol, .. } => {
                    output.push(symbol);
                    DecodeState::AtRoot
                }
                HuffmanNode::Internal { .. } => DecodeState::Descending(next),
            };
        }

        if let DecodeState::Descending(_) = state {
            return Err(LzwHuffError::truncated(reader.bit_position()));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd_tree() -> HuffmanTree {
        let table: FrequencyTable = [(b'A', 5), (b'B', 2), (b'C', 1), (b'D', 1)]
            .into_iter()
            .collect();
        HuffmanTree::build(&table).unwrap()
    }

    #[test]
    fn test_build_shape() {
        let tree = abcd_tree();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.weight(), 9);
        assert_eq!(tree.depth(), 3);

        // C and D merge first, then B with (C,D), then that with A
        assert_eq!(
            tree.nodes()[4],
            HuffmanNode::Internal {
                left: 2,
                right: 3,
                weight: 2
            }
        );
        assert_eq!(
            tree.nodes()[5],
            HuffmanNode::Internal {
                left: 1,
                right: 4,
                weight: 4
            }
        );
        assert_eq!(
            tree.nodes()[6],
            HuffmanNode::Internal {
                left: 5,
                right: 0,
                weight: 9
            }
        );
        assert_eq!(tree.root(), 6);
    }

    #[test]
    fn test_build_deterministic() {
        let table = FrequencyTable::from_bytes(b"the rain in spain stays mainly in the plain");
        let a = HuffmanTree::build(&table).unwrap();
        let b = HuffmanTree::build(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_empty() {
        assert!(matches!(
            HuffmanTree::build(&FrequencyTable::new()),
            Err(LzwHuffError::EmptyTree)
        ));
    }

    #[test]
    fn test_single_leaf() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"zzz")).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.depth(), 0);

        assert_eq!(tree.decode(&[0x00], 3).unwrap(), b"zzz");
        assert!(matches!(
            tree.decode(&[0b0010_0000], 3),
            Err(LzwHuffError::InvalidHuffmanCode { bit_position: 2 })
        ));
    }

    #[test]
    fn test_decode() {
        let tree = abcd_tree();
        // A=1 B=00 C=010 D=011: "ABCD" = 1 00 010 011
        let data = [0b1000_1001, 0b1000_0000];
        assert_eq!(tree.decode(&data, 9).unwrap(), b"ABCD");
    }

    #[test]
    fn test_decode_truncated() {
        let tree = abcd_tree();
        // "A" then the first two bits of C
        assert!(matches!(
            tree.decode(&[0b1010_0000], 3),
            Err(LzwHuffError::TruncatedStream { bit_position: 3 })
        ));
    }

    #[test]
    fn test_decode_bit_len_too_long() {
        let tree = abcd_tree();
        assert!(matches!(
            tree.decode(&[0xFF], 9),
            Err(LzwHuffError::InvalidBitLength { .. })
        ));
    }

    #[test]
    fn test_decode_empty() {
        let tree = abcd_tree();
        assert!(tree.decode(&[], 0).unwrap().is_empty());
    }
}
