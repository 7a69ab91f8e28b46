#![allow(clippy::unwrap_used)]


use rustc_hash::FxHashSet;

use crate::base::{NodeId, TerminalClass, TerminalId, TerminalSet};
use crate::grammar::GrammarBuilder;

/// Declare a keyword and a node matching it
fn keyword(builder: &mut GrammarBuilder, name: &str) -> (TerminalId, NodeId) {
    let terminal = builder.keyword(name).unwrap();
    (terminal, builder.terminal_node(terminal).unwrap())
}

fn punctuation(builder: &mut GrammarBuilder, name: &str) -> (TerminalId, NodeId) {
    let terminal = builder.punctuation(name).unwrap();
    (terminal, builder.terminal_node(terminal).unwrap())
}

/// Declare the identifier-class terminals and return them
fn identifier_terminals(builder: &mut GrammarBuilder) -> (TerminalId, TerminalId) {
    let plain = builder
        .terminal("IDENTIFIER", TerminalClass::Identifier)
        .unwrap();
    let quoted = builder
        .terminal("QUOTED_IDENTIFIER", TerminalClass::QuotedIdentifier)
        .unwrap();
    (plain, quoted)
}

/// Order-insensitive view of a terminal set
fn unordered(set: &TerminalSet) -> FxHashSet<TerminalId> {
    set.iter().copied().collect()
}

fn terminals(items: &[TerminalId]) -> FxHashSet<TerminalId> {
    items.iter().copied().collect()
}
