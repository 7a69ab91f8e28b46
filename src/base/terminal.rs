//! Interned terminal symbols
//!
//! A terminal is an atomic input symbol produced by the (external) tokenizer:
//! a keyword, a punctuation character, an identifier, and so on. Terminals are
//! interned once per grammar and compared by identity through [`TerminalId`].

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

/// Handle of an interned terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(u32);

impl TerminalId {
    /// Id for a table position, `None` past `u32::MAX` entries
    fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Position of the terminal in its table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Category of a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalClass {
    /// Reserved or non-reserved keyword (`SELECT`, `FROM`)
    Keyword,
    /// Built-in function name (`COUNT`, `NVL`)
    Function,
    /// Single character punctuation (`(`, `,`, `.`)
    Punctuation,
    /// Operator (`=`, `||`, `<=`)
    Operator,
    /// String or numeric literal
    Literal,
    /// Plain identifier
    Identifier,
    /// Quoted identifier (`"My Table"`)
    QuotedIdentifier,
}

impl TerminalClass {
    /// Whether terminals of this class are matched by an identifier node
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier | Self::QuotedIdentifier)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Function => "function",
            Self::Punctuation => "punctuation",
            Self::Operator => "operator",
            Self::Literal => "literal",
            Self::Identifier => "identifier",
            Self::QuotedIdentifier => "quoted identifier",
        }
    }
}

/// Name and class of an interned terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalInfo {
    pub name: SmolStr,
    pub class: TerminalClass,
}

/// Interning table for the terminals of one grammar.
#[derive(Debug, Clone, Default)]
pub struct TerminalTable {
    entries: IndexMap<SmolStr, TerminalClass, FxBuildHasher>,
}

impl TerminalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a terminal.
    ///
    /// Returns the existing id when the name is already known. The second
    /// element is the class already registered for the name, so callers can
    /// detect a conflicting redeclaration. `None` when the table cannot issue
    /// another id.
    pub fn intern(&mut self, name: &str, class: TerminalClass) -> Option<(TerminalId, TerminalClass)> {
        if let Some((index, _, existing)) = self.entries.get_full(name) {
            return TerminalId::from_index(index).map(|id| (id, *existing));
        }
        let id = TerminalId::from_index(self.entries.len())?;
        self.entries.insert(SmolStr::new(name), class);
        Some((id, class))
    }

    /// Look up a terminal by name
    pub fn get(&self, name: &str) -> Option<TerminalId> {
        self.entries
            .get_index_of(name)
            .and_then(TerminalId::from_index)
    }

    /// Name of a terminal, `None` for ids issued by another table
    pub fn name(&self, id: TerminalId) -> Option<&str> {
        self.entries.get_index(id.index()).map(|(name, _)| name.as_str())
    }

    pub fn class(&self, id: TerminalId) -> Option<TerminalClass> {
        self.entries.get_index(id.index()).map(|(_, class)| *class)
    }

    pub fn info(&self, id: TerminalId) -> Option<TerminalInfo> {
        self.entries
            .get_index(id.index())
            .map(|(name, class)| TerminalInfo {
                name: name.clone(),
                class: *class,
            })
    }

    /// Whether the terminal belongs to the identifier class.
    /// Unknown ids are never identifiers.
    pub fn is_identifier(&self, id: TerminalId) -> bool {
        self.class(id).is_some_and(|class| class.is_identifier())
    }

    /// All identifier-class terminals, in interning order
    pub fn identifiers(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.iter()
            .filter(|(_, _, class)| class.is_identifier())
            .map(|(id, _, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerminalId, &str, TerminalClass)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, (name, class))| {
                TerminalId::from_index(index).map(|id| (id, name.as_str(), *class))
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
