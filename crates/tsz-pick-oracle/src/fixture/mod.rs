//! In-memory oracle for tests.
//!
//! A `FixtureProgram` is laid out by hand over real source text: nodes are
//! placed by searching the text for their snippets, and symbols, types,
//! signatures, and diagnostics are attached the way the checker would attach
//! them. Types are stored pre-rendered, so `type_to_string` returns exactly
//! what the fixture was given.
//!
//! ```ignore
//! let mut b = FixtureBuilder::new();
//! let root = b.add_file("/src/add.ts", "function add(a: number) {}");
//! let func = b.add_child(root, "FunctionDeclaration", "function add(a: number) {}");
//! let name = b.add_child(func, "Identifier", "add");
//! ```

pub mod flags;

use tsz_pick_common::{LineMap, Position, byte_offset_of, utf16_offset_of};

use crate::diagnostics::OracleDiagnostic;
use crate::ids::{NodeIndex, NodeSpan, SignatureId, SignatureKind, SymbolId, TypeId};
use crate::{TypeFormat, TypeOracle};

pub use flags::{symbol_flags, type_flags};

#[derive(Debug, Clone)]
struct FixtureFile {
    name: String,
    text: String,
    line_map: LineMap,
    root: NodeIndex,
    diagnostics: Vec<OracleDiagnostic>,
}

#[derive(Debug, Clone)]
struct FixtureNode {
    kind: String,
    file: usize,
    span: NodeSpan,
    children: Vec<NodeIndex>,
    symbol: Option<SymbolId>,
    ty: Option<TypeId>,
}

#[derive(Debug, Clone)]
struct FixtureType {
    display: String,
    flags: u32,
    symbol: Option<SymbolId>,
    union_members: Option<Vec<TypeId>>,
    non_nullable: Option<TypeId>,
    properties: Vec<SymbolId>,
    call_signatures: Vec<SignatureId>,
    construct_signatures: Vec<SignatureId>,
}

#[derive(Debug, Clone)]
struct FixtureSymbol {
    name: String,
    flags: u32,
    declarations: Vec<NodeIndex>,
    value_declaration: Option<NodeIndex>,
    ty: Option<TypeId>,
}

/// A complete in-memory program.
#[derive(Debug, Clone)]
pub struct FixtureProgram {
    files: Vec<FixtureFile>,
    nodes: Vec<FixtureNode>,
    types: Vec<FixtureType>,
    symbols: Vec<FixtureSymbol>,
    signatures: Vec<String>,
}

impl FixtureProgram {
    /// The `any` type every unannotated node falls back to.
    pub const ANY: TypeId = TypeId(0);

    fn file(&self, file_name: &str) -> Option<&FixtureFile> {
        self.files.iter().find(|file| file.name == file_name)
    }

    fn node(&self, node: NodeIndex) -> Option<&FixtureNode> {
        if node.is_none() {
            return None;
        }
        self.nodes.get(node.0 as usize)
    }

    fn ty(&self, ty: TypeId) -> Option<&FixtureType> {
        self.types.get(ty.0 as usize)
    }

    fn symbol(&self, symbol: SymbolId) -> Option<&FixtureSymbol> {
        self.symbols.get(symbol.0 as usize)
    }
}

/// Builder for [`FixtureProgram`].
///
/// Builder methods panic on inconsistent input (a snippet that is not in the
/// parent's text, an unknown id); fixtures are test code.
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    program: FixtureProgram,
}

impl FixtureBuilder {
    pub fn new() -> Self {
        let any = FixtureType {
            display: "any".to_string(),
            flags: type_flags::ANY,
            symbol: None,
            union_members: None,
            non_nullable: None,
            properties: Vec::new(),
            call_signatures: Vec::new(),
            construct_signatures: Vec::new(),
        };
        Self {
            program: FixtureProgram {
                files: Vec::new(),
                nodes: Vec::new(),
                types: vec![any],
                symbols: Vec::new(),
                signatures: Vec::new(),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Syntax
    // -------------------------------------------------------------------------

    /// Add a source file and return its `SourceFile` root node.
    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) -> NodeIndex {
        let text = text.into();
        let line_map = LineMap::build(&text);
        let end = line_map.text_len();
        let file = self.program.files.len();
        let root = self.push_node(FixtureNode {
            kind: "SourceFile".to_string(),
            file,
            span: NodeSpan { pos: 0, start: 0, end },
            children: Vec::new(),
            symbol: None,
            ty: None,
        });
        self.program.files.push(FixtureFile {
            name: name.into(),
            text,
            line_map,
            root,
            diagnostics: Vec::new(),
        });
        root
    }

    /// Add a child of `parent` covering the next occurrence of `snippet`.
    ///
    /// The search starts where the previous sibling ended (or at the parent's
    /// first token), and that point becomes the child's full start, so any
    /// whitespace or comments before the snippet count as its leading trivia.
    pub fn add_child(&mut self, parent: NodeIndex, kind: &str, snippet: &str) -> NodeIndex {
        let parent_node = &self.program.nodes[parent.0 as usize];
        let file = parent_node.file;
        let cursor = parent_node
            .children
            .last()
            .map(|last| self.program.nodes[last.0 as usize].span.end)
            .unwrap_or(parent_node.span.start);
        let parent_end = parent_node.span.end;

        let text = &self.program.files[file].text;
        let Some(cursor_byte) = byte_offset_of(text, cursor) else {
            panic!("offset {cursor} is not a character boundary");
        };
        let Some(found) = text[cursor_byte..].find(snippet) else {
            panic!("snippet {snippet:?} not found after offset {cursor} for {kind}");
        };
        let start_byte = cursor_byte + found;
        let start = utf16_offset_of(text, start_byte);
        let end = utf16_offset_of(text, start_byte + snippet.len());
        assert!(
            end <= parent_end,
            "snippet {snippet:?} extends past its parent (end {end} > {parent_end})"
        );

        self.add_node(parent, kind, NodeSpan { pos: cursor, start, end })
    }

    /// Add a child of `parent` with an explicit span.
    pub fn add_node(&mut self, parent: NodeIndex, kind: &str, span: NodeSpan) -> NodeIndex {
        let file = self.program.nodes[parent.0 as usize].file;
        let node = self.push_node(FixtureNode {
            kind: kind.to_string(),
            file,
            span,
            children: Vec::new(),
            symbol: None,
            ty: None,
        });
        self.program.nodes[parent.0 as usize].children.push(node);
        node
    }

    fn push_node(&mut self, node: FixtureNode) -> NodeIndex {
        let idx = NodeIndex(self.program.nodes.len() as u32);
        self.program.nodes.push(node);
        idx
    }

    /// UTF-16 offset of the `nth` occurrence of `needle` in a file.
    pub fn offset_of(&self, file_name: &str, needle: &str, nth: usize) -> u32 {
        let Some(file) = self.program.file(file_name) else {
            panic!("unknown fixture file {file_name}");
        };
        let Some((byte, _)) = file.text.match_indices(needle).nth(nth) else {
            panic!("{needle:?} occurs fewer than {} times", nth + 1);
        };
        utf16_offset_of(&file.text, byte)
    }

    // -------------------------------------------------------------------------
    // Symbols
    // -------------------------------------------------------------------------

    /// Add a symbol.
    pub fn add_symbol(&mut self, name: &str, flags: u32) -> SymbolId {
        let id = SymbolId(self.program.symbols.len() as u32);
        self.program.symbols.push(FixtureSymbol {
            name: name.to_string(),
            flags,
            declarations: Vec::new(),
            value_declaration: None,
            ty: None,
        });
        id
    }

    /// Record `node` as a declaration of `symbol`. The first declaration
    /// becomes the value declaration.
    pub fn declare(&mut self, symbol: SymbolId, node: NodeIndex) {
        let sym = &mut self.program.symbols[symbol.0 as usize];
        sym.declarations.push(node);
        sym.value_declaration.get_or_insert(node);
    }

    /// Bind `node` to `symbol`.
    pub fn bind(&mut self, node: NodeIndex, symbol: SymbolId) {
        self.program.nodes[node.0 as usize].symbol = Some(symbol);
    }

    /// Set the declared type of `symbol`.
    pub fn set_symbol_type(&mut self, symbol: SymbolId, ty: TypeId) {
        self.program.symbols[symbol.0 as usize].ty = Some(ty);
    }

    /// Add a property symbol of type `ty` to an object type.
    pub fn add_property(
        &mut self,
        owner: TypeId,
        name: &str,
        ty: TypeId,
        optional: bool,
    ) -> SymbolId {
        let mut flags = symbol_flags::PROPERTY;
        if optional {
            flags |= symbol_flags::OPTIONAL;
        }
        let symbol = self.add_symbol(name, flags);
        self.set_symbol_type(symbol, ty);
        self.program.types[owner.0 as usize].properties.push(symbol);
        symbol
    }

    /// Attach an existing symbol as a property of `owner`.
    pub fn attach_property(&mut self, owner: TypeId, symbol: SymbolId) {
        self.program.types[owner.0 as usize].properties.push(symbol);
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    /// Add a type rendered as `display`.
    pub fn add_type(&mut self, display: &str, flags: u32) -> TypeId {
        let id = TypeId(self.program.types.len() as u32);
        self.program.types.push(FixtureType {
            display: display.to_string(),
            flags,
            symbol: None,
            union_members: None,
            non_nullable: None,
            properties: Vec::new(),
            call_signatures: Vec::new(),
            construct_signatures: Vec::new(),
        });
        id
    }

    /// Add a union of `members`.
    pub fn add_union(&mut self, display: &str, members: &[TypeId]) -> TypeId {
        let id = self.add_type(display, type_flags::UNION);
        self.program.types[id.0 as usize].union_members = Some(members.to_vec());
        id
    }

    /// Set the type that `ty` becomes once `null` and `undefined` are removed.
    pub fn set_non_nullable(&mut self, ty: TypeId, non_nullable: TypeId) {
        self.program.types[ty.0 as usize].non_nullable = Some(non_nullable);
    }

    /// Set the symbol behind a type.
    pub fn set_type_symbol(&mut self, ty: TypeId, symbol: SymbolId) {
        self.program.types[ty.0 as usize].symbol = Some(symbol);
    }

    /// Add a signature rendered as `display` to `ty`.
    pub fn add_signature(
        &mut self,
        ty: TypeId,
        kind: SignatureKind,
        display: &str,
    ) -> SignatureId {
        let id = SignatureId(self.program.signatures.len() as u32);
        self.program.signatures.push(display.to_string());
        let target = &mut self.program.types[ty.0 as usize];
        match kind {
            SignatureKind::Call => target.call_signatures.push(id),
            SignatureKind::Construct => target.construct_signatures.push(id),
        }
        id
    }

    /// Set the type the checker assigns to `node`.
    pub fn set_node_type(&mut self, node: NodeIndex, ty: TypeId) {
        self.program.nodes[node.0 as usize].ty = Some(ty);
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Report a diagnostic for a file.
    pub fn add_diagnostic(&mut self, file_name: &str, diagnostic: OracleDiagnostic) {
        let Some(file) = self.program.files.iter_mut().find(|f| f.name == file_name) else {
            panic!("unknown fixture file {file_name}");
        };
        file.diagnostics.push(diagnostic);
    }

    pub fn finish(self) -> FixtureProgram {
        self.program
    }
}

impl TypeOracle for FixtureProgram {
    fn source_file(&self, file_name: &str) -> Option<NodeIndex> {
        self.file(file_name).map(|file| file.root)
    }

    fn source_text(&self, file_name: &str) -> Option<&str> {
        self.file(file_name).map(|file| file.text.as_str())
    }

    fn node_file(&self, node: NodeIndex) -> Option<&str> {
        let node = self.node(node)?;
        self.files.get(node.file).map(|file| file.name.as_str())
    }

    fn node_span(&self, node: NodeIndex) -> Option<NodeSpan> {
        self.node(node).map(|node| node.span)
    }

    fn node_kind(&self, node: NodeIndex) -> &str {
        self.node(node).map(|node| node.kind.as_str()).unwrap_or("Unknown")
    }

    fn node_children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.node(node).map(|node| node.children.clone()).unwrap_or_default()
    }

    fn node_text(&self, node: NodeIndex) -> Option<&str> {
        let node = self.node(node)?;
        let text = &self.files.get(node.file)?.text;
        let start = byte_offset_of(text, node.span.start)?;
        let end = byte_offset_of(text, node.span.end)?;
        text.get(start..end)
    }

    fn offset_of(&self, file_name: &str, line: u32, character: u32) -> Option<u32> {
        self.file(file_name)?
            .line_map
            .position_to_offset(Position::new(line, character))
    }

    fn line_and_character_of(&self, file_name: &str, offset: u32) -> Option<(u32, u32)> {
        let pos = self.file(file_name)?.line_map.offset_to_position(offset);
        Some((pos.line, pos.character))
    }

    fn type_of_node(&self, node: NodeIndex) -> TypeId {
        self.node(node).and_then(|node| node.ty).unwrap_or(Self::ANY)
    }

    fn type_to_string(&self, ty: TypeId, _enclosing: NodeIndex, _format: TypeFormat) -> String {
        self.ty(ty)
            .map(|ty| ty.display.clone())
            .unwrap_or_else(|| "any".to_string())
    }

    fn type_flags(&self, ty: TypeId) -> u32 {
        self.ty(ty).map(|ty| ty.flags).unwrap_or(type_flags::ANY)
    }

    fn type_flag_table(&self) -> &[(&str, u32)] {
        flags::TYPE_FLAG_TABLE
    }

    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId> {
        self.ty(ty)?.symbol
    }

    fn non_nullable_type(&self, ty: TypeId) -> TypeId {
        self.ty(ty).and_then(|t| t.non_nullable).unwrap_or(ty)
    }

    fn union_members(&self, ty: TypeId) -> Option<Vec<TypeId>> {
        self.ty(ty)?.union_members.clone()
    }

    fn apparent_properties(&self, ty: TypeId) -> Vec<SymbolId> {
        self.ty(ty).map(|ty| ty.properties.clone()).unwrap_or_default()
    }

    fn signatures(&self, ty: TypeId, kind: SignatureKind) -> Vec<SignatureId> {
        let Some(ty) = self.ty(ty) else {
            return Vec::new();
        };
        match kind {
            SignatureKind::Call => ty.call_signatures.clone(),
            SignatureKind::Construct => ty.construct_signatures.clone(),
        }
    }

    fn signature_to_string(
        &self,
        signature: SignatureId,
        _enclosing: NodeIndex,
        _format: TypeFormat,
    ) -> String {
        self.signatures
            .get(signature.0 as usize)
            .cloned()
            .unwrap_or_default()
    }

    fn symbol_at(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node(node)?.symbol
    }

    fn symbol_name(&self, symbol: SymbolId) -> String {
        self.symbol(symbol)
            .map(|sym| sym.name.clone())
            .unwrap_or_default()
    }

    fn symbol_flags(&self, symbol: SymbolId) -> u32 {
        self.symbol(symbol).map(|sym| sym.flags).unwrap_or(symbol_flags::NONE)
    }

    fn symbol_flag_table(&self) -> &[(&str, u32)] {
        flags::SYMBOL_FLAG_TABLE
    }

    fn symbol_is_optional(&self, symbol: SymbolId) -> bool {
        self.symbol_flags(symbol) & symbol_flags::OPTIONAL != 0
    }

    fn symbol_declarations(&self, symbol: SymbolId) -> Vec<NodeIndex> {
        self.symbol(symbol)
            .map(|sym| sym.declarations.clone())
            .unwrap_or_default()
    }

    fn symbol_value_declaration(&self, symbol: SymbolId) -> Option<NodeIndex> {
        self.symbol(symbol)?.value_declaration
    }

    fn type_of_symbol_at(&self, symbol: SymbolId, _location: NodeIndex) -> TypeId {
        self.symbol(symbol).and_then(|sym| sym.ty).unwrap_or(Self::ANY)
    }

    fn pre_emit_diagnostics(&self, file_name: &str) -> Vec<OracleDiagnostic> {
        self.file(file_name)
            .map(|file| file.diagnostics.clone())
            .unwrap_or_default()
    }
}
