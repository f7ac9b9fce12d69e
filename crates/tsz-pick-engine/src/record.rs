//! The answer to a type query.

use bitflags::bitflags;
use serde::Serialize;
use tsz_pick_common::FlagSummary;

use crate::diagnostics::DiagnosticSummary;
use crate::facts::{DeclarationSummary, Facts, PropertySummary, SignatureSummary, SymbolSummary};
use crate::query::ResolvedLocation;

bitflags! {
    /// Result lists a caller does not want. Each flag empties exactly one
    /// list and leaves everything else untouched.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Omit: u8 {
        const DIAGNOSTICS = 1 << 0;
        const PROPERTIES = 1 << 1;
        const SIGNATURES = 1 << 2;
    }
}

/// Where the query landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordPosition {
    /// 1-based
    pub line: u32,
    /// 1-based
    pub column: u32,
    /// 0-based UTF-16 offset
    pub offset: u32,
}

/// A complete answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub position: RecordPosition,
    pub matched_text: String,
    pub node_kind: String,
    pub type_string: String,
    pub type_flags: FlagSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolSummary>,
    pub signatures: Vec<SignatureSummary>,
    pub properties: Vec<PropertySummary>,
    pub declarations: Vec<DeclarationSummary>,
    pub diagnostics: Vec<DiagnosticSummary>,
}

/// Put a record together. Every list is present, even when empty.
pub fn assemble(
    file: String,
    project: Option<String>,
    location: ResolvedLocation,
    node_kind: String,
    facts: Facts,
    diagnostics: Vec<DiagnosticSummary>,
) -> ResultRecord {
    ResultRecord {
        file,
        project,
        position: RecordPosition {
            line: location.line,
            column: location.column,
            offset: location.offset,
        },
        matched_text: location.matched_text,
        node_kind,
        type_string: facts.type_string,
        type_flags: facts.type_flags,
        symbol: facts.symbol,
        signatures: facts.signatures,
        properties: facts.properties,
        declarations: facts.declarations,
        diagnostics,
    }
}

impl ResultRecord {
    /// Empty the lists named in `omit`.
    #[must_use]
    pub fn with_omissions(mut self, omit: Omit) -> Self {
        if omit.contains(Omit::DIAGNOSTICS) {
            self.diagnostics.clear();
        }
        if omit.contains(Omit::PROPERTIES) {
            self.properties.clear();
        }
        if omit.contains(Omit::SIGNATURES) {
            self.signatures.clear();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsz_pick_oracle::SignatureKind;

    fn sample() -> ResultRecord {
        let facts = Facts {
            type_string: "(a: number) => number".to_string(),
            type_flags: FlagSummary {
                flags: 1 << 19,
                names: vec!["Object".to_string()],
            },
            symbol: Some(SymbolSummary {
                name: "f".to_string(),
                flags: FlagSummary {
                    flags: 1 << 4,
                    names: vec!["Function".to_string()],
                },
            }),
            signatures: vec![SignatureSummary {
                kind: SignatureKind::Call,
                text: "(a: number): number".to_string(),
            }],
            properties: vec![PropertySummary {
                name: "length".to_string(),
                type_string: "number".to_string(),
                optional: false,
            }],
            declarations: Vec::new(),
        };
        let diagnostics = vec![DiagnosticSummary {
            category: "error".to_string(),
            code: 2322,
            message: "nope".to_string(),
            file: None,
            line: None,
            column: None,
        }];
        assemble(
            "/f.ts".to_string(),
            None,
            ResolvedLocation {
                offset: 9,
                line: 1,
                column: 10,
                matched_text: "f".to_string(),
            },
            "Identifier".to_string(),
            facts,
            diagnostics,
        )
    }

    #[test]
    fn test_each_omission_is_independent() {
        let full = sample();

        let no_diags = full.clone().with_omissions(Omit::DIAGNOSTICS);
        assert!(no_diags.diagnostics.is_empty());
        assert_eq!(no_diags.properties, full.properties);
        assert_eq!(no_diags.signatures, full.signatures);

        let no_props = full.clone().with_omissions(Omit::PROPERTIES);
        assert!(no_props.properties.is_empty());
        assert_eq!(no_props.diagnostics, full.diagnostics);
        assert_eq!(no_props.signatures, full.signatures);

        let no_sigs = full.clone().with_omissions(Omit::SIGNATURES);
        assert!(no_sigs.signatures.is_empty());
        assert_eq!(no_sigs.diagnostics, full.diagnostics);
        assert_eq!(no_sigs.properties, full.properties);

        assert_eq!(full.clone().with_omissions(Omit::empty()), full);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["matchedText"], "f");
        assert_eq!(json["nodeKind"], "Identifier");
        assert_eq!(json["typeString"], "(a: number) => number");
        assert_eq!(json["typeFlags"]["names"][0], "Object");
        assert_eq!(json["position"]["offset"], 9);
        assert_eq!(json["signatures"][0]["kind"], "call");
        assert_eq!(json["properties"][0]["type"], "number");
        assert_eq!(json["declarations"], serde_json::json!([]));
        assert!(json.get("project").is_none());
    }
}
