//! End-to-end queries against hand-built programs.

use tsz_pick_engine::{Omit, PickError, PickOptions, QueryTarget, pick_in_program};
use tsz_pick_oracle::fixture::{FixtureBuilder, FixtureProgram, symbol_flags, type_flags};
use tsz_pick_oracle::{DiagnosticCategory, MessageChain, OracleDiagnostic, SignatureKind};

const ADD_FILE: &str = "/proj/src/add.ts";
const ADD_SOURCE: &str = "export function add(a: number, b: number): number {\n  return a + b;\n}\n";

fn add_program() -> FixtureProgram {
    let mut b = FixtureBuilder::new();
    let root = b.add_file(ADD_FILE, ADD_SOURCE);
    let func = b.add_child(
        root,
        "FunctionDeclaration",
        "export function add(a: number, b: number): number {\n  return a + b;\n}",
    );
    let _export = b.add_child(func, "ExportKeyword", "export");
    let name = b.add_child(func, "Identifier", "add");
    let param_a = b.add_child(func, "Parameter", "a: number");
    let _param_b = b.add_child(func, "Parameter", "b: number");
    let _ret = b.add_child(func, "NumberKeyword", "number");
    let body = b.add_child(func, "Block", "{\n  return a + b;\n}");
    let ret = b.add_child(body, "ReturnStatement", "return a + b;");
    let sum = b.add_child(ret, "BinaryExpression", "a + b");
    let a_use = b.add_child(sum, "Identifier", "a");

    let number = b.add_type("number", type_flags::NUMBER);
    let fn_type = b.add_type("(a: number, b: number) => number", type_flags::OBJECT);
    b.add_signature(fn_type, SignatureKind::Call, "(a: number, b: number): number");

    let add_sym = b.add_symbol("add", symbol_flags::FUNCTION | symbol_flags::EXPORT_VALUE);
    b.declare(add_sym, func);
    b.set_symbol_type(add_sym, fn_type);
    b.bind(name, add_sym);
    b.set_node_type(name, fn_type);
    b.set_type_symbol(fn_type, add_sym);

    let a_sym = b.add_symbol("a", symbol_flags::FUNCTION_SCOPED_VARIABLE);
    b.declare(a_sym, param_a);
    b.bind(a_use, a_sym);
    b.set_node_type(a_use, number);

    b.finish()
}

fn at(line: u32, column: u32) -> QueryTarget {
    QueryTarget::Position { line, column }
}

fn pattern(pattern: &str, index: usize) -> QueryTarget {
    QueryTarget::Pattern {
        pattern: pattern.to_string(),
        flags: None,
        index,
    }
}

#[test]
fn test_function_identifier_has_one_call_signature() {
    let program = add_program();
    let record = pick_in_program(
        &program,
        ADD_FILE,
        None,
        &pattern("add", 0),
        &PickOptions::default(),
    )
    .unwrap();

    assert_eq!(record.node_kind, "Identifier");
    assert_eq!(record.type_string, "(a: number, b: number) => number");
    assert_eq!(record.signatures.len(), 1);
    assert_eq!(record.signatures[0].kind, SignatureKind::Call);
    assert_eq!(record.signatures[0].text, "(a: number, b: number): number");
    assert_eq!(record.matched_text, "add");
    assert_eq!((record.position.line, record.position.column), (1, 17));
    assert_eq!(record.position.offset, 16);

    let symbol = record.symbol.as_ref().unwrap();
    assert_eq!(symbol.name, "add");
    assert_eq!(symbol.flags.names, vec!["ExportValue", "Function"]);

    assert_eq!(record.declarations.len(), 1);
    let decl = &record.declarations[0];
    assert_eq!(decl.file, ADD_FILE);
    assert_eq!((decl.line, decl.column), (1, 1));
    assert_eq!(decl.kind, "FunctionDeclaration");
    assert_eq!(
        decl.snippet,
        "export function add(a: number, b: number): number { return a + b; }"
    );
}

#[test]
fn test_position_and_pattern_agree() {
    let program = add_program();
    let options = PickOptions::default();
    let by_pattern =
        pick_in_program(&program, ADD_FILE, None, &pattern(r"a \+", 0), &options).unwrap();
    let by_position = pick_in_program(&program, ADD_FILE, None, &at(2, 10), &options).unwrap();

    assert_eq!(by_pattern.position, by_position.position);
    assert_eq!(by_pattern.type_string, "number");
    assert_eq!(by_position.type_string, "number");
    assert_eq!(by_position.matched_text, "");
    assert_eq!(by_pattern.matched_text, "a +");
}

#[test]
fn test_repeated_queries_are_identical() {
    let program = add_program();
    let options = PickOptions::default();
    let first = pick_in_program(&program, ADD_FILE, None, &at(1, 18), &options).unwrap();
    let second = pick_in_program(&program, ADD_FILE, None, &at(1, 18), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_union_call_site_properties() {
    let file = "/proj/src/user.ts";
    let source = "declare function load(full: boolean): { id: string } | { id: string; email: string };\n\
                  const user = load(true);\n";
    let mut b = FixtureBuilder::new();
    let root = b.add_file(file, source);
    let _decl = b.add_child(root, "FunctionDeclaration", "declare function load");
    let stmt = b.add_child(root, "VariableStatement", "const user = load(true);");
    let var = b.add_child(stmt, "VariableDeclaration", "user = load(true)");
    let _name = b.add_child(var, "Identifier", "user");
    let call = b.add_child(var, "CallExpression", "load(true)");

    let string = b.add_type("string", type_flags::STRING);
    let short = b.add_type("{ id: string; }", type_flags::OBJECT);
    b.add_property(short, "id", string, false);
    let long = b.add_type("{ id: string; email: string; }", type_flags::OBJECT);
    b.add_property(long, "id", string, false);
    b.add_property(long, "email", string, false);
    let union = b.add_union("{ id: string; } | { id: string; email: string; }", &[short, long]);
    b.set_node_type(call, union);
    let program = b.finish();

    let record = pick_in_program(
        &program,
        file,
        None,
        &pattern(r"load\(true\)", 0),
        &PickOptions::default(),
    )
    .unwrap();

    assert_eq!(record.node_kind, "CallExpression");
    let props: Vec<(&str, bool)> = record
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.optional))
        .collect();
    assert_eq!(props, vec![("email", true), ("id", false)]);
    assert!(record.type_flags.names.contains(&"Union".to_string()));
}

#[test]
fn test_syntax_error_is_reported() {
    let file = "/proj/src/broken.ts";
    let source = "const x = ;\n";
    let mut b = FixtureBuilder::new();
    let root = b.add_file(file, source);
    let _stmt = b.add_child(root, "VariableStatement", "const x = ;");
    let semi = b.offset_of(file, ";", 0);
    b.add_diagnostic(
        file,
        OracleDiagnostic::error(file, semi, 1, "Expression expected.", 1109),
    );
    b.add_diagnostic(
        file,
        OracleDiagnostic {
            category: DiagnosticCategory::Error,
            code: 2322,
            file: Some(file.to_string()),
            start: Some(6),
            length: Some(1),
            message: MessageChain::text("Type 'string' is not assignable to type 'number'.")
                .with_next(MessageChain::text("Details follow.")),
        },
    );
    let program = b.finish();

    let record =
        pick_in_program(&program, file, None, &at(1, 1), &PickOptions::default()).unwrap();
    assert!(record.diagnostics.iter().any(|d| d.category == "error"));
    assert_eq!(record.diagnostics[0].code, 1109);
    assert_eq!(
        (record.diagnostics[0].line, record.diagnostics[0].column),
        (Some(1), Some(11))
    );
    assert_eq!(
        record.diagnostics[1].message,
        "Type 'string' is not assignable to type 'number'.\n  Details follow."
    );
}

#[test]
fn test_pattern_index_out_of_range() {
    let file = "/proj/src/lit.ts";
    let source = "log('hi'); log('hi'); log('hi');";
    let mut b = FixtureBuilder::new();
    b.add_file(file, source);
    let program = b.finish();

    let err = pick_in_program(&program, file, None, &pattern("'hi'", 5), &PickOptions::default())
        .unwrap_err();
    match err {
        PickError::InvalidQuery(message) => {
            assert!(message.contains("matched 3 time(s)"), "{message}");
            assert!(message.contains("index 5"), "{message}");
        }
        other => panic!("expected InvalidQuery, got {other:?}"),
    }
}

#[test]
fn test_omissions_only_touch_their_list() {
    let file = "/proj/src/omit.ts";
    let source = "declare const f: { (n: number): void; size: number };\nf;";
    let mut b = FixtureBuilder::new();
    let root = b.add_file(file, source);
    let _decl = b.add_child(
        root,
        "VariableStatement",
        "declare const f: { (n: number): void; size: number };",
    );
    let use_site = b.add_child(root, "Identifier", "f;");
    let number = b.add_type("number", type_flags::NUMBER);
    let ty = b.add_type("{ (n: number): void; size: number; }", type_flags::OBJECT);
    b.add_signature(ty, SignatureKind::Call, "(n: number): void");
    b.add_property(ty, "size", number, false);
    b.set_node_type(use_site, ty);
    b.add_diagnostic(
        file,
        OracleDiagnostic::global(DiagnosticCategory::Message, "Using default options.", 6000),
    );
    let program = b.finish();

    let target = at(2, 1);
    let full = pick_in_program(&program, file, None, &target, &PickOptions::default()).unwrap();
    assert_eq!(full.signatures.len(), 1);
    assert_eq!(full.properties.len(), 1);
    assert_eq!(full.diagnostics.len(), 1);
    assert_eq!(full.diagnostics[0].category, "message");

    for omit in [Omit::DIAGNOSTICS, Omit::PROPERTIES, Omit::SIGNATURES] {
        let options = PickOptions::default().with_omit(omit);
        let record = pick_in_program(&program, file, None, &target, &options).unwrap();
        assert_eq!(record.diagnostics.is_empty(), omit == Omit::DIAGNOSTICS);
        assert_eq!(record.properties.is_empty(), omit == Omit::PROPERTIES);
        assert_eq!(record.signatures.is_empty(), omit == Omit::SIGNATURES);
        assert_eq!(record.type_string, full.type_string);
    }
}

#[test]
fn test_file_outside_program_is_construction_error() {
    let program = add_program();
    let err = pick_in_program(
        &program,
        "/proj/src/missing.ts",
        None,
        &at(1, 1),
        &PickOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PickError::OracleConstruction(_)));
}

#[test]
fn test_record_serializes_with_project() {
    let program = add_program();
    let record = pick_in_program(
        &program,
        ADD_FILE,
        Some("/proj/tsconfig.json".to_string()),
        &pattern("add", 0),
        &PickOptions::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["project"], "/proj/tsconfig.json");
    assert_eq!(json["symbol"]["name"], "add");
    assert_eq!(json["signatures"][0]["kind"], "call");
}
