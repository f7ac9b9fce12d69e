//! Opaque handles into a checker program.
//!
//! The oracle owns its syntax tree and type graph; callers only ever hold
//! these indices, so the tree needs no parent back-pointers and no shared
//! ownership on our side.

use serde::Serialize;

/// Index of a syntax node inside a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

/// Index of a type inside a program's type graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub u32);

/// Index of a symbol inside a program's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolId(pub u32);

/// Index of a call or construct signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SignatureId(pub u32);

/// Span of a node in UTF-16 offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpan {
    /// Full start, including leading trivia (whitespace and comments)
    pub pos: u32,
    /// Start of the node's first token
    pub start: u32,
    /// End of the node (exclusive)
    pub end: u32,
}

impl NodeSpan {
    /// Whether `offset` falls inside the span, counting leading trivia and the
    /// end position itself.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        self.pos <= offset && offset <= self.end
    }
}

/// Whether a signature is invoked with a call or with `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    Call,
    Construct,
}
