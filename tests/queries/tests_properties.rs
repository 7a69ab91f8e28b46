//! Properties every built grammar satisfies.

use lookahead::base::{LeafSet, TerminalSet, Version};
use lookahead::grammar::NodeKind;
use lookahead::LookaheadContext;

use crate::helpers::sql_grammar::{SQL, build_sql_grammar};

#[test]
fn test_required_is_subset_of_possible() {
    for (id, _) in SQL.grammar.nodes() {
        let lookup = SQL.grammar.lookup(id);
        for leaf in lookup.required_leaves() {
            assert!(
                lookup.could_start_with_leaf(*leaf),
                "{}: required leaf {} is not possible",
                SQL.grammar.debug_name(id),
                leaf
            );
        }
        for terminal in lookup.required_terminals() {
            assert!(lookup.could_start_with_terminal(*terminal));
        }
    }
}

#[test]
fn test_leaves_start_with_themselves() {
    for (id, node) in SQL.grammar.nodes() {
        if !node.is_leaf() {
            continue;
        }
        let lookup = SQL.grammar.lookup(id);
        assert_eq!(lookup.possible_leaves().len(), 1);
        assert!(lookup.should_start_with_leaf(id));
        if let NodeKind::Terminal(terminal) = node.kind {
            assert!(lookup.should_start_with_terminal(terminal));
            assert!(lookup.contains_terminal(terminal));
        }
    }
}

#[test]
fn test_first_terminals_are_contained() {
    for (id, _) in SQL.grammar.nodes() {
        let lookup = SQL.grammar.lookup(id);
        for terminal in lookup.possible_terminals() {
            assert!(lookup.contains_terminal(*terminal));
        }
    }
}

#[test]
fn test_building_twice_gives_identical_caches() {
    let again = build_sql_grammar().unwrap();

    assert_eq!(again.grammar.len(), SQL.grammar.len());
    for (id, _) in SQL.grammar.nodes() {
        let first = SQL.grammar.lookup(id);
        let second = again.grammar.lookup(id);
        assert!(first.possible_leaves().iter().eq(second.possible_leaves().iter()));
        assert!(first.required_leaves().iter().eq(second.required_leaves().iter()));
        assert_eq!(first.starts_with_identifier(), second.starts_with_identifier());
    }
}

#[test]
fn test_permissive_context_matches_cache_everywhere() {
    let ctx = LookaheadContext::new().with_version(Version::new(99, 0));

    for (id, _) in SQL.grammar.nodes() {
        let lookup = SQL.grammar.lookup(id);

        let mut terminals = TerminalSet::default();
        lookup.collect_possible_terminals(&ctx, &mut terminals);
        assert_eq!(
            &terminals,
            lookup.possible_terminals(),
            "{}",
            SQL.grammar.debug_name(id)
        );

        let mut leaves = LeafSet::default();
        lookup.collect_possible_leaves(&ctx, &mut leaves);
        assert_eq!(&leaves, lookup.possible_leaves(), "{}", SQL.grammar.debug_name(id));
    }
}

#[test]
fn test_collection_is_idempotent() {
    let lookup = SQL.grammar.lookup(SQL.with_statement);
    let ctx = LookaheadContext::new().with_branch("json");

    let mut bucket = TerminalSet::default();
    lookup.collect_possible_terminals(&ctx, &mut bucket);
    let once = bucket.clone();
    lookup.collect_possible_terminals(&ctx, &mut bucket);

    assert_eq!(bucket, once);
}
