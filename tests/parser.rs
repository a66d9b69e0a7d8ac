//! Integration tests for upl-parser crate.

use upl_common::Limits;
use upl_parser::parse;
use upl_syntax::{BinOp, ExprKind, Stmt, TypeName};

fn tree(source: &str) -> String {
    let outcome = parse(source, &Limits::default());
    let program = outcome.program.expect("source should parse");
    program.to_string()
}

fn errors(source: &str) -> Vec<(u32, String)> {
    errors_with(source, Limits::default())
}

fn errors_with(source: &str, limits: Limits) -> Vec<(u32, String)> {
    let outcome = parse(source, &limits);
    assert!(outcome.program.is_none());
    outcome
        .diagnostics
        .iter()
        .map(|d| (d.line, d.message.clone()))
        .collect()
}

/// Place `stmt` on line 3 after a declaration of `x`. Recovery may discard
/// a few following lines, so padding statements separate it from `end`.
fn at_line_three(stmt: &str) -> String {
    format!("begin\nint x;\n{}\nprint(0);\nprint(0);\nprint(0);\nend", stmt)
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_if_else() {
    assert_eq!(
        tree("begin bool b; if (true == b) then { } else { print(2 * 3); } end"),
        "\
Prog
  Stmts
    DeclStmt
      Type_bool
      InitDecl
        b
    IfStmt
      IfThen
        EqExpr
          True
          Id
            b
        Stmts
      ElseOpt
        Stmts
          PrintStmt
            MulExpr
              Num
                2
              Num
                3
"
    );
}

#[test]
fn test_parse_do_while() {
    assert_eq!(
        tree("begin int n = 0; do { n = n + 1; } while (n >= 10); end"),
        "\
Prog
  Stmts
    DeclStmt
      Type_int
      InitDecl
        n
        Num
          0
    DoWhileStmt
      Stmts
        AssignStmt
          n
          AddExpr
            Id
              n
            Num
              1
      Gte
        Id
          n
        Num
          10
"
    );
}

#[test]
fn test_parse_for_with_assignment_init() {
    let source = "begin\nint i;\nfor (i = 0; i > 3; i = i + 1) { print(i); }\nend";
    assert_eq!(
        tree(source),
        "\
Prog
  Stmts
    DeclStmt
      Type_int
      InitDecl
        i
    ForStmt
      ForInit
        i
        Num
          0
      Gt
        Id
          i
        Num
          3
      Update
        i
        AddExpr
          Id
            i
          Num
            1
      Stmts
        PrintStmt
          Id
            i
"
    );
}

#[test]
fn test_for_declaration_is_global() {
    let outcome = parse(
        "begin for (int k = 1; k > 0; k = k) { } print(k); end",
        &Limits::default(),
    );
    let program = outcome.program.expect("source should parse");
    assert_eq!(program.body.stmts.len(), 2);
    assert!(outcome.symbols.is_declared("k"));

    let dump = program.to_string();
    assert!(dump.contains("    ForStmt\n      ForInit\n        Type_int\n        InitDecl\n          k\n"));
}

#[test]
fn test_empty_blocks_everywhere() {
    let outcome = parse(
        "begin if (true) then { } else { } do { } while (false); end",
        &Limits::default(),
    );
    let program = outcome.program.expect("source should parse");
    let Stmt::If(if_stmt) = &program.body.stmts[0] else {
        panic!("expected an if statement");
    };
    assert!(if_stmt.then_block.is_empty());
    assert!(if_stmt.else_block.as_ref().is_some_and(|b| b.is_empty()));
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_binary_operators_are_left_associative() {
    let outcome = parse("begin int a = 1 + 2 + 3; end", &Limits::default());
    let program = outcome.program.expect("source should parse");
    let Stmt::Decl(decl) = &program.body.stmts[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(decl.ty, TypeName::Int);
    let value = decl.init.value.as_ref().expect("initializer");
    let ExprKind::Binary { op, left, right } = &value.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinOp::Add);
    assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Add, .. }));
    assert_eq!(right.kind, ExprKind::NumberLiteral("3".to_string()));
}

#[test]
fn test_parentheses_are_transparent() {
    assert_eq!(
        tree("begin print((1 + 2) * 3); end"),
        "\
Prog
  Stmts
    PrintStmt
      MulExpr
        AddExpr
          Num
            1
          Num
            2
        Num
          3
"
    );
}

#[test]
fn test_relational_binds_tighter_than_equality() {
    assert_eq!(
        tree("begin print(1 > 2 == false); end"),
        "\
Prog
  Stmts
    PrintStmt
      EqExpr
        Gt
          Num
            1
          Num
            2
        False
"
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_identifier_without_assignment() {
    assert_eq!(
        errors(&at_line_three("x + 1;")),
        vec![(
            3,
            "Expected 'int' or 'bool' for declaration or '=' for assignment".to_string()
        )]
    );
}

#[test]
fn test_unknown_statement_start() {
    assert_eq!(
        errors(&at_line_three(";")),
        vec![(
            3,
            "Expected 'int', 'bool', identifier, or statement keyword".to_string()
        )]
    );
}

#[test]
fn test_missing_begin() {
    assert_eq!(
        errors("print(1);"),
        vec![(1, "Expected 'begin'".to_string())]
    );
}

#[test]
fn test_missing_end() {
    assert_eq!(
        errors("begin\nprint(1);\n"),
        vec![(3, "Expected 'end'".to_string())]
    );
}

#[test]
fn test_invalid_primary_expression() {
    assert_eq!(
        errors(&at_line_three("print(+);")),
        vec![(3, "Invalid primary expression".to_string())]
    );
}

#[test]
fn test_for_loop_messages() {
    let cases = [
        ("for (; true; x = 1) { }", "Expected 'int', 'bool', or identifier for for-loop initialization"),
        ("for (x = 1 true; x = 1) { }", "Expected ';' after for-loop initialization"),
        ("for (x = 1; true x = 1) { }", "Expected ';' after for-loop condition"),
        ("for (x = 1; true; 1) { }", "Expected identifier in for-loop update"),
        ("for (x = 1; true; x 1) { }", "Expected '=' in for-loop update"),
        ("for (x = 1; true; x = 1 { }", "Expected ')' after for-loop update"),
        ("for (x = 1; true; x = 1) print(x);", "Expected '{' for for-loop body"),
    ];
    for (stmt, message) in cases {
        assert_eq!(errors(&at_line_three(stmt)), vec![(3, message.to_string())], "{}", stmt);
    }
}

#[test]
fn test_for_body_missing_close_brace() {
    assert_eq!(
        errors("begin\nint x;\nfor (x = 1; true; x = 1) {\nend"),
        vec![(4, "Expected '}' after for-loop body".to_string())]
    );
}

#[test]
fn test_too_many_statements() {
    let limits = Limits::new().max_stmts_per_block(2);
    assert_eq!(
        errors_with("begin\nprint(1);\nprint(2);\nprint(3);\nend", limits),
        vec![(4, "Too many statements".to_string())]
    );
}

#[test]
fn test_statement_cap_applies_per_block() {
    let limits = Limits::new().max_stmts_per_block(2);
    let source = "begin\nprint(1);\nif (true) then {\nprint(2);\nprint(3);\n}\nend";
    let outcome = parse(source, &limits);
    assert!(outcome.program.is_some());
}

#[test]
fn test_too_many_variables() {
    let limits = Limits::new().max_symbols(2);
    assert_eq!(
        errors_with("begin\nint a;\nint b;\nint c;\nint a;\nend", limits),
        vec![
            (4, "Too many variables declared".to_string()),
            (5, "Too many variables declared".to_string()),
        ]
    );
}

#[test]
fn test_block_nesting_limit() {
    let limits = Limits::new().max_nesting_depth(1);
    let source = "begin\ndo {\ndo { } while (true);\nprint(0);\n} while (true);\nend";
    assert_eq!(
        errors_with(source, limits),
        vec![(3, "Nesting too deep".to_string())]
    );
}

#[test]
fn test_deep_parentheses_report_instead_of_overflowing() {
    let source = format!(
        "begin\nprint({}1{});\nend",
        "(".repeat(20_000),
        ")".repeat(20_000)
    );
    let outcome = parse(&source, &Limits::default());
    assert!(outcome.program.is_none());
    let first = outcome.diagnostics.iter().next().expect("a diagnostic");
    assert_eq!((first.line, first.message.as_str()), (2, "Nesting too deep"));
}
