//! Type-checker oracle interface for tsz-pick.
//!
//! tsz-pick does not infer types itself. Everything it reports comes from a
//! checker program that answers the questions in [`TypeOracle`]: what node
//! is where, what type a node has, which symbol it binds to, what a type's
//! signatures and properties are, and which diagnostics a file produced.
//!
//! The oracle is passed explicitly to every operation. A program is built for
//! one query and dropped with it, so implementations are free to keep lazy
//! caches behind `&self` as long as they are not shared across threads.

use bitflags::bitflags;

pub mod diagnostics;
pub mod ids;

#[cfg(feature = "fixture")]
pub mod fixture;

pub use diagnostics::{DiagnosticCategory, MessageChain, OracleDiagnostic};
pub use ids::{NodeIndex, NodeSpan, SignatureId, SignatureKind, SymbolId, TypeId};

bitflags! {
    /// How a type or signature is written out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFormat: u32 {
        /// Never elide members with `...`.
        const NO_TRUNCATION = 1 << 0;
        /// Write `ns.Type` rather than `Type`.
        const USE_FULLY_QUALIFIED_TYPE = 1 << 1;
        /// Write function types as `(a: T) => U`.
        const WRITE_ARROW_STYLE_SIGNATURE = 1 << 2;
        /// Write `| undefined` for optional members.
        const ADD_UNDEFINED = 1 << 3;
        /// Use alias names even when the alias is not in scope at the node.
        const USE_ALIAS_DEFINED_OUTSIDE_CURRENT_SCOPE = 1 << 4;
    }
}

impl TypeFormat {
    /// The single rendering mode used for every answer, so output never
    /// depends on where or how often a query runs.
    pub const VERBOSE: TypeFormat = TypeFormat::all();
}

/// The questions tsz-pick asks a checker program.
///
/// Offsets are UTF-16 code-unit offsets into the file's full text.
/// File names are the names the program was built with.
pub trait TypeOracle {
    // ---------------------------------------------------------------------
    // Syntax
    // ---------------------------------------------------------------------

    /// Root node of a source file in the program.
    fn source_file(&self, file_name: &str) -> Option<NodeIndex>;

    /// Full text of a source file in the program.
    fn source_text(&self, file_name: &str) -> Option<&str>;

    /// Name of the file containing `node`.
    fn node_file(&self, node: NodeIndex) -> Option<&str>;

    /// Span of `node`.
    fn node_span(&self, node: NodeIndex) -> Option<NodeSpan>;

    /// Syntax-kind name of `node` (`Identifier`, `CallExpression`, ...).
    fn node_kind(&self, node: NodeIndex) -> &str;

    /// Children of `node` in source order.
    fn node_children(&self, node: NodeIndex) -> Vec<NodeIndex>;

    /// Source text of `node` without its leading trivia.
    fn node_text(&self, node: NodeIndex) -> Option<&str>;

    // ---------------------------------------------------------------------
    // Positions
    // ---------------------------------------------------------------------

    /// 0-based (line, character) to offset. `None` if out of range.
    fn offset_of(&self, file_name: &str, line: u32, character: u32) -> Option<u32>;

    /// Offset to 0-based (line, character).
    fn line_and_character_of(&self, file_name: &str, offset: u32) -> Option<(u32, u32)>;

    // ---------------------------------------------------------------------
    // Types
    // ---------------------------------------------------------------------

    /// Type the checker assigns to `node`.
    fn type_of_node(&self, node: NodeIndex) -> TypeId;

    /// Render `ty` as seen from `enclosing`.
    fn type_to_string(&self, ty: TypeId, enclosing: NodeIndex, format: TypeFormat) -> String;

    /// Raw type-flag mask of `ty`.
    fn type_flags(&self, ty: TypeId) -> u32;

    /// Every named constant of the checker's type-flag enumeration.
    fn type_flag_table(&self) -> &[(&str, u32)];

    /// Symbol behind `ty`, if the type has one.
    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId>;

    /// `ty` with `null` and `undefined` removed.
    fn non_nullable_type(&self, ty: TypeId) -> TypeId;

    /// Constituents of `ty` when it is a union, `None` otherwise.
    fn union_members(&self, ty: TypeId) -> Option<Vec<TypeId>>;

    /// Properties of the apparent (structurally resolved) form of `ty`.
    fn apparent_properties(&self, ty: TypeId) -> Vec<SymbolId>;

    /// Call or construct signatures declared on `ty`, in declaration order.
    fn signatures(&self, ty: TypeId, kind: SignatureKind) -> Vec<SignatureId>;

    /// Render a signature as seen from `enclosing`.
    fn signature_to_string(
        &self,
        signature: SignatureId,
        enclosing: NodeIndex,
        format: TypeFormat,
    ) -> String;

    // ---------------------------------------------------------------------
    // Symbols
    // ---------------------------------------------------------------------

    /// Symbol bound directly to `node`.
    fn symbol_at(&self, node: NodeIndex) -> Option<SymbolId>;

    /// Display name of `symbol`.
    fn symbol_name(&self, symbol: SymbolId) -> String;

    /// Raw symbol-flag mask of `symbol`.
    fn symbol_flags(&self, symbol: SymbolId) -> u32;

    /// Every named constant of the checker's symbol-flag enumeration.
    fn symbol_flag_table(&self) -> &[(&str, u32)];

    /// Whether `symbol` is declared optional (`x?: T`).
    fn symbol_is_optional(&self, symbol: SymbolId) -> bool;

    /// Declarations of `symbol`, in the order the checker merged them.
    fn symbol_declarations(&self, symbol: SymbolId) -> Vec<NodeIndex>;

    /// The declaration that introduced the symbol's value, if any.
    fn symbol_value_declaration(&self, symbol: SymbolId) -> Option<NodeIndex>;

    /// Type of `symbol` as seen from `location`.
    fn type_of_symbol_at(&self, symbol: SymbolId, location: NodeIndex) -> TypeId;

    // ---------------------------------------------------------------------
    // Diagnostics
    // ---------------------------------------------------------------------

    /// Syntactic, semantic, and options diagnostics for one file, before emit.
    fn pre_emit_diagnostics(&self, file_name: &str) -> Vec<OracleDiagnostic>;
}
