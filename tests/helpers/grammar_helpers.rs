//! Small helpers for building and inspecting grammars in tests.

use lookahead::base::{TerminalClass, TerminalId, TerminalSet};
use lookahead::grammar::{Grammar, GrammarBuilder};
use lookahead::NodeId;

/// Declare a keyword and a node matching it.
pub fn keyword(builder: &mut GrammarBuilder, name: &str) -> (TerminalId, NodeId) {
    let terminal = builder.keyword(name).expect("keyword should be declared");
    let node = builder
        .terminal_node(terminal)
        .expect("terminal node should be created");
    (terminal, node)
}

/// Declare a punctuation terminal and a node matching it.
pub fn punctuation(builder: &mut GrammarBuilder, name: &str) -> (TerminalId, NodeId) {
    let terminal = builder
        .punctuation(name)
        .expect("punctuation should be declared");
    let node = builder
        .terminal_node(terminal)
        .expect("terminal node should be created");
    (terminal, node)
}

/// Declare the identifier-class terminals every fixture uses.
pub fn identifier_terminals(builder: &mut GrammarBuilder) -> (TerminalId, TerminalId) {
    let plain = builder
        .terminal("IDENTIFIER", TerminalClass::Identifier)
        .expect("identifier terminal should be declared");
    let quoted = builder
        .terminal("QUOTED_IDENTIFIER", TerminalClass::QuotedIdentifier)
        .expect("quoted identifier terminal should be declared");
    (plain, quoted)
}

/// Sorted terminal names of a set, for readable assertions.
pub fn terminal_names(grammar: &Grammar, set: &TerminalSet) -> Vec<String> {
    let mut names: Vec<String> = set
        .iter()
        .filter_map(|terminal| grammar.terminals().name(*terminal))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}
