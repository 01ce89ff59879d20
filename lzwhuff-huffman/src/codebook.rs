//! Symbol-to-code tables derived from a [`HuffmanTree`].

use crate::frequency::ALPHABET_SIZE;
use crate::tree::{HuffmanNode, HuffmanTree};
use lzwhuff_core::error::{LzwHuffError, Result};
use std::fmt;

/// Longest code a [`Code`] can hold.
pub const MAX_CODE_LENGTH: usize = 64;

/// A Huffman code: the low `len` bits of `bits`, first bit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Code value, right-aligned.
    pub bits: u64,
    /// Number of bits (1 to 64).
    pub len: u8,
}

impl Code {
    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

/// Code for every symbol present in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl Codebook {
    /// Derive the codebook from a tree, 0 for left and 1 for right.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`.
    ///
    /// # Errors
    ///
    /// [`LzwHuffError::CodeTooLong`] if a leaf sits deeper than
    /// [`MAX_CODE_LENGTH`].
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; ALPHABET_SIZE];
        let nodes = tree.nodes();

        if let HuffmanNode::Leaf { symbol, .. } = nodes[tree.root()] {
            codes[symbol as usize] = Some(Code { bits: 0, len: 1 });
            return Ok(Self { codes });
        }

        let mut stack = vec![(tree.root(), 0u64, 0usize)];
        while let Some((index, bits, len)) = stack.pop() {
            match nodes[index] {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes[symbol as usize] = Some(Code {
                        bits,
                        len: len as u8,
                    });
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if len == MAX_CODE_LENGTH {
                        return Err(LzwHuffError::CodeTooLong {
                            symbol: first_leaf(nodes, index),
                            length: len + 1,
                        });
                    }
                    stack.push((right, (bits << 1) | 1, len + 1));
                    stack.push((left, bits << 1, len + 1));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Code for `symbol`, if it occurs in the tree.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Longest code length in the book.
    pub fn max_len(&self) -> u8 {
        self.iter().map(|(_, c)| c.len).max().unwrap_or(0)
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

fn first_leaf(nodes: &[HuffmanNode], mut index: usize) -> u8 {
    loop {
        match nodes[index] {
            HuffmanNode::Leaf { symbol, .. } => return symbol,
            HuffmanNode::Internal { left, .. } => index = left,
        }
    }
}
