//! A small SQL grammar shared by the integration tests.
//!
//! ```text
//! with_statement := [with_clause] statement
//! with_clause    := WITH name AS '(' select ')'
//! statement      := select | insert | delete
//! select         := SELECT [DISTINCT | ALL] select_list FROM table_ref [where_clause]
//! select_list    := column_list | '*'                      (sortable)
//! column_list    := name {',' name}
//! table_ref      := name | JSON_TABLE '(' expr ')'         (12.2+, json branch)
//! where_clause   := WHERE expr '=' expr
//! expr           := '(' expr ')' | NUMBER | NULL | name
//! insert         := INSERT INTO name ['(' column_list ')'] VALUES '(' expr {',' expr} ')'
//! delete         := DELETE [FROM] name [where_clause]
//! name           := [schema '.'] object
//! ```

use lookahead::base::{TerminalClass, TerminalId, Version};
use lookahead::grammar::{ChildRef, Grammar, GrammarBuilder, GrammarError, PathSegment, Wrapping};
use lookahead::NodeId;
use once_cell::sync::Lazy;

use super::grammar_helpers::{identifier_terminals, keyword, punctuation};

/// The built fixture with handles to its interesting rules.
pub struct SqlGrammar {
    pub grammar: Grammar,
    pub with_statement: NodeId,
    pub statement: NodeId,
    pub select: NodeId,
    pub select_list: NodeId,
    pub column_list: NodeId,
    pub table_ref: NodeId,
    pub json_table: NodeId,
    pub where_clause: NodeId,
    pub expr: NodeId,
    pub nested_expr: NodeId,
    pub insert: NodeId,
    pub column_spec: NodeId,
    pub values_list: NodeId,
    pub delete: NodeId,
    pub name: NodeId,
    pub comma: NodeId,
    pub lparen: NodeId,
}

impl SqlGrammar {
    /// Terminal id by name; panics on unknown names.
    pub fn terminal(&self, name: &str) -> TerminalId {
        self.grammar
            .terminal(name)
            .unwrap_or_else(|| panic!("terminal '{name}' is not declared"))
    }
}

/// Built once and shared by every test in a binary.
pub static SQL: Lazy<SqlGrammar> =
    Lazy::new(|| build_sql_grammar().expect("SQL fixture grammar should build"));

pub fn build_sql_grammar() -> Result<SqlGrammar, GrammarError> {
    let mut builder = GrammarBuilder::new();
    identifier_terminals(&mut builder);

    let (_, with_kw) = keyword(&mut builder, "WITH");
    let (_, as_kw) = keyword(&mut builder, "AS");
    let (_, select_kw) = keyword(&mut builder, "SELECT");
    let (_, distinct_kw) = keyword(&mut builder, "DISTINCT");
    let (_, all_kw) = keyword(&mut builder, "ALL");
    let (_, from_kw) = keyword(&mut builder, "FROM");
    let (_, where_kw) = keyword(&mut builder, "WHERE");
    let (_, insert_kw) = keyword(&mut builder, "INSERT");
    let (_, into_kw) = keyword(&mut builder, "INTO");
    let (_, values_kw) = keyword(&mut builder, "VALUES");
    let (_, delete_kw) = keyword(&mut builder, "DELETE");
    let (_, null_kw) = keyword(&mut builder, "NULL");
    let json_table_terminal = builder.terminal("JSON_TABLE", TerminalClass::Function)?;
    let json_table_kw = builder.terminal_node(json_table_terminal)?;
    let number_terminal = builder.terminal("NUMBER", TerminalClass::Literal)?;
    let number = builder.terminal_node(number_terminal)?;

    let (_, comma) = punctuation(&mut builder, ",");
    let (_, dot) = punctuation(&mut builder, ".");
    let (_, lparen) = punctuation(&mut builder, "(");
    let (_, rparen) = punctuation(&mut builder, ")");
    let (_, star) = punctuation(&mut builder, "*");
    let (_, equals) = punctuation(&mut builder, "=");

    // name := [schema '.'] object
    let schema = builder.identifier()?;
    let object = builder.identifier()?;
    let name = builder.qualified_path(
        vec![
            PathSegment {
                leaf: schema,
                optional: true,
            },
            PathSegment {
                leaf: object,
                optional: false,
            },
        ],
        dot,
    )?;

    // expr is recursive, so it is reserved by name first
    let expr = builder.rule("expr")?;
    let nested_expr = builder.sequence(vec![lparen.into(), expr.into(), rparen.into()])?;
    builder.define_one_of(
        expr,
        vec![
            nested_expr.into(),
            number.into(),
            null_kw.into(),
            name.into(),
        ],
    )?;

    let column_list = builder.iteration(name, Some(comma), None)?;
    let select_list = builder.sortable_one_of(vec![column_list.into(), star.into()])?;

    let json_table = builder.sequence(vec![
        json_table_kw.into(),
        lparen.into(),
        expr.into(),
        rparen.into(),
    ])?;
    let table_ref = builder.one_of(vec![
        name.into(),
        ChildRef::required(json_table)
            .since(Version::new(12, 2))
            .in_branch("json"),
    ])?;

    let where_clause = builder.sequence(vec![
        where_kw.into(),
        expr.into(),
        equals.into(),
        expr.into(),
    ])?;

    let quantifier = builder.one_of(vec![distinct_kw.into(), all_kw.into()])?;
    let select = builder.rule("select")?;
    builder.define_sequence(
        select,
        vec![
            select_kw.into(),
            ChildRef::optional(quantifier),
            select_list.into(),
            from_kw.into(),
            table_ref.into(),
            ChildRef::optional(where_clause),
        ],
    )?;

    let column_spec = builder.iteration(
        name,
        Some(comma),
        Some(Wrapping::mandatory(lparen, rparen)),
    )?;
    let values_list = builder.iteration(
        expr,
        Some(comma),
        Some(Wrapping::mandatory(lparen, rparen)),
    )?;
    let insert = builder.sequence(vec![
        insert_kw.into(),
        into_kw.into(),
        name.into(),
        ChildRef::optional(column_spec),
        values_kw.into(),
        values_list.into(),
    ])?;

    let delete = builder.sequence(vec![
        delete_kw.into(),
        ChildRef::optional(from_kw),
        name.into(),
        ChildRef::optional(where_clause),
    ])?;

    let statement = builder.rule("statement")?;
    builder.define_one_of(statement, vec![select.into(), insert.into(), delete.into()])?;

    let with_clause = builder.sequence(vec![
        with_kw.into(),
        name.into(),
        as_kw.into(),
        lparen.into(),
        select.into(),
        rparen.into(),
    ])?;
    let with_statement = builder.rule("with_statement")?;
    builder.define_sequence(
        with_statement,
        vec![ChildRef::optional(with_clause), statement.into()],
    )?;

    Ok(SqlGrammar {
        grammar: builder.build()?,
        with_statement,
        statement,
        select,
        select_list,
        column_list,
        table_ref,
        json_table,
        where_clause,
        expr,
        nested_expr,
        insert,
        column_spec,
        values_list,
        delete,
        name,
        comma,
        lparen,
    })
}
