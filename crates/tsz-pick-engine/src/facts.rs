//! Collecting what the checker knows about a node.
//!
//! Everything here is read from the oracle and rendered with
//! [`TypeFormat::VERBOSE`]; the same node always produces the same facts.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace};
use tsz_pick_common::FlagSummary;
use tsz_pick_common::limits::SNIPPET_ELLIPSIS;
use tsz_pick_oracle::{NodeIndex, SignatureKind, SymbolId, TypeFormat, TypeId, TypeOracle};

use crate::options::PickLimits;

/// The symbol a node resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolSummary {
    pub name: String,
    pub flags: FlagSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureSummary {
    pub kind: SignatureKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySummary {
    pub name: String,
    #[serde(rename = "type")]
    pub type_string: String,
    pub optional: bool,
}

/// One declaration of the resolved symbol. `line` and `column` are 1-based
/// and point at the declaration's first token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationSummary {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub kind: String,
    pub snippet: String,
}

/// Type facts about a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facts {
    pub type_string: String,
    pub type_flags: FlagSummary,
    pub symbol: Option<SymbolSummary>,
    pub signatures: Vec<SignatureSummary>,
    pub properties: Vec<PropertySummary>,
    pub declarations: Vec<DeclarationSummary>,
}

/// Gather the type, symbol, signatures, properties and declarations of `node`.
///
/// The symbol is the one bound at the node, falling back to the symbol behind
/// its type. Declarations are only reported when there is a symbol.
pub fn aggregate<O: TypeOracle + ?Sized>(
    oracle: &O,
    node: NodeIndex,
    limits: &PickLimits,
) -> Facts {
    let ty = oracle.type_of_node(node);
    let type_string = oracle.type_to_string(ty, node, TypeFormat::VERBOSE);
    let type_flags = FlagSummary::resolve(oracle.type_flags(ty), oracle.type_flag_table());

    let symbol = oracle.symbol_at(node).or_else(|| oracle.type_symbol(ty));
    let symbol_summary = symbol.map(|symbol| SymbolSummary {
        name: oracle.symbol_name(symbol),
        flags: FlagSummary::resolve(oracle.symbol_flags(symbol), oracle.symbol_flag_table()),
    });

    let signatures = collect_signatures(oracle, node, ty, limits.max_signatures);
    let properties = collect_properties(oracle, node, ty, limits.max_properties);
    let declarations = symbol
        .map(|symbol| collect_declarations(oracle, symbol, limits))
        .unwrap_or_default();

    debug!(
        type_string = %type_string,
        symbol = symbol_summary.as_ref().map(|s| s.name.as_str()),
        signatures = signatures.len(),
        properties = properties.len(),
        declarations = declarations.len(),
        "aggregated facts"
    );

    Facts {
        type_string,
        type_flags,
        symbol: symbol_summary,
        signatures,
        properties,
        declarations,
    }
}

/// Call signatures first, then construct signatures, each capped at `limit`.
fn collect_signatures<O: TypeOracle + ?Sized>(
    oracle: &O,
    node: NodeIndex,
    ty: TypeId,
    limit: usize,
) -> Vec<SignatureSummary> {
    let mut out = Vec::new();
    for kind in [SignatureKind::Call, SignatureKind::Construct] {
        let signatures = oracle.signatures(ty, kind);
        if signatures.len() > limit {
            trace!(?kind, total = signatures.len(), limit, "truncating signatures");
        }
        out.extend(signatures.into_iter().take(limit).map(|sig| SignatureSummary {
            kind,
            text: oracle.signature_to_string(sig, node, TypeFormat::VERBOSE),
        }));
    }
    out
}

/// Properties of the non-nullable part of `ty`, merged across union members.
///
/// Names are sorted before the bound is applied. A property is optional when
/// any member declares it optional or, for a union, when some member lacks
/// it. Its type is read from the first member that has it.
fn collect_properties<O: TypeOracle + ?Sized>(
    oracle: &O,
    node: NodeIndex,
    ty: TypeId,
    limit: usize,
) -> Vec<PropertySummary> {
    let projected = oracle.non_nullable_type(ty);
    let members = oracle.union_members(projected);
    let is_union = members.is_some();
    let members = members.unwrap_or_else(|| vec![projected]);

    let member_props: Vec<FxHashMap<String, SymbolId>> = members
        .iter()
        .map(|&member| {
            let mut props = FxHashMap::default();
            for prop in oracle.apparent_properties(member) {
                props.entry(oracle.symbol_name(prop)).or_insert(prop);
            }
            props
        })
        .collect();

    let names: BTreeSet<&str> = member_props
        .iter()
        .flat_map(|props| props.keys().map(String::as_str))
        .collect();
    if names.len() > limit {
        trace!(total = names.len(), limit, "truncating properties");
    }

    names
        .into_iter()
        .take(limit)
        .filter_map(|name| {
            let present: Vec<Option<SymbolId>> = member_props
                .iter()
                .map(|props| props.get(name).copied())
                .collect();
            let canonical = present.iter().flatten().next().copied()?;

            let optional = present
                .iter()
                .flatten()
                .any(|&prop| oracle.symbol_is_optional(prop))
                || (is_union && present.iter().any(Option::is_none));

            let location = oracle
                .symbol_value_declaration(canonical)
                .or_else(|| oracle.symbol_declarations(canonical).first().copied())
                .unwrap_or(node);
            let prop_ty = oracle.type_of_symbol_at(canonical, location);

            Some(PropertySummary {
                name: name.to_string(),
                type_string: oracle.type_to_string(prop_ty, location, TypeFormat::VERBOSE),
                optional,
            })
        })
        .collect()
}

fn collect_declarations<O: TypeOracle + ?Sized>(
    oracle: &O,
    symbol: SymbolId,
    limits: &PickLimits,
) -> Vec<DeclarationSummary> {
    oracle
        .symbol_declarations(symbol)
        .into_iter()
        .take(limits.max_declarations)
        .filter_map(|decl| {
            let file = oracle.node_file(decl)?;
            let span = oracle.node_span(decl)?;
            let (line, character) = oracle.line_and_character_of(file, span.start)?;
            let text = oracle.node_text(decl).unwrap_or_default();
            Some(DeclarationSummary {
                file: file.to_string(),
                line: line + 1,
                column: character + 1,
                kind: oracle.node_kind(decl).to_string(),
                snippet: condense_snippet(text, limits.max_snippet_len),
            })
        })
        .collect()
}

/// Collapse every run of whitespace to one space, trim, and cut to `max_len`
/// UTF-16 code units. A cut snippet ends in a single ellipsis and never
/// exceeds `max_len` units; it is shorter when the cut lands on whitespace or
/// would split a surrogate pair.
pub fn condense_snippet(text: &str, max_len: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.encode_utf16().count() <= max_len {
        return collapsed;
    }

    let budget = max_len.saturating_sub(SNIPPET_ELLIPSIS.len_utf16());
    let mut used = 0;
    let mut cut = String::new();
    for ch in collapsed.chars() {
        used += ch.len_utf16();
        if used > budget {
            break;
        }
        cut.push(ch);
    }
    cut.truncate(cut.trim_end().len());
    cut.push(SNIPPET_ELLIPSIS);
    cut
}
