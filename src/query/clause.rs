//! Clause splitter — segments a query string by keyword.

use serde::Serialize;

use crate::model::Entity;

/// The recognized clause keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClauseKind {
    Match,
    OptionalMatch,
    Where,
    Return,
    OrderBy,
    Skip,
    Limit,
    Create,
    Merge,
    Delete,
    Remove,
    Set,
    With,
    Union,
    Unwind,
    Foreach,
    Call,
}

impl ClauseKind {
    /// The keyword text as it appears in a query.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Match => "MATCH",
            ClauseKind::OptionalMatch => "OPTIONAL MATCH",
            ClauseKind::Where => "WHERE",
            ClauseKind::Return => "RETURN",
            ClauseKind::OrderBy => "ORDER BY",
            ClauseKind::Skip => "SKIP",
            ClauseKind::Limit => "LIMIT",
            ClauseKind::Create => "CREATE",
            ClauseKind::Merge => "MERGE",
            ClauseKind::Delete => "DELETE",
            ClauseKind::Remove => "REMOVE",
            ClauseKind::Set => "SET",
            ClauseKind::With => "WITH",
            ClauseKind::Union => "UNION",
            ClauseKind::Unwind => "UNWIND",
            ClauseKind::Foreach => "FOREACH",
            ClauseKind::Call => "CALL",
        }
    }

    /// Only these clause kinds carry entity patterns.
    pub fn carries_entities(&self) -> bool {
        matches!(
            self,
            ClauseKind::Create | ClauseKind::Match | ClauseKind::OptionalMatch
        )
    }
}

impl std::fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clause record: its keyword, raw text span, and parsed entities.
///
/// `text` runs from the keyword occurrence up to (but not including) the
/// next keyword, trimmed. Entities are attached by the entity parser and
/// stay empty for every kind other than CREATE/MATCH/OPTIONAL MATCH.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub kind: ClauseKind,
    pub text: String,
    pub entities: Vec<Entity>,
}

/// Keyword table, multi-word keywords first so `OPTIONAL MATCH` and
/// `ORDER BY` win over their trailing single words.
const KEYWORDS: &[(&str, ClauseKind)] = &[
    ("OPTIONAL MATCH", ClauseKind::OptionalMatch),
    ("ORDER BY", ClauseKind::OrderBy),
    ("MATCH", ClauseKind::Match),
    ("WHERE", ClauseKind::Where),
    ("RETURN", ClauseKind::Return),
    ("SKIP", ClauseKind::Skip),
    ("LIMIT", ClauseKind::Limit),
    ("CREATE", ClauseKind::Create),
    ("MERGE", ClauseKind::Merge),
    ("DELETE", ClauseKind::Delete),
    ("REMOVE", ClauseKind::Remove),
    ("SET", ClauseKind::Set),
    ("WITH", ClauseKind::With),
    ("UNION", ClauseKind::Union),
    ("UNWIND", ClauseKind::Unwind),
    ("FOREACH", ClauseKind::Foreach),
    ("CALL", ClauseKind::Call),
];

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Keyword starting exactly at the head of `rest`, if the occurrence is a
/// whole token (not a prefix of a longer identifier).
fn keyword_at(rest: &str) -> Option<(ClauseKind, usize)> {
    for &(kw, kind) in KEYWORDS {
        if let Some(after) = rest.strip_prefix(kw) {
            if after.bytes().next().is_none_or(|b| !is_ident_byte(b)) {
                return Some((kind, kw.len()));
            }
        }
    }
    None
}

/// Split a query string into ordered clause records.
///
/// The scan is left to right and case-sensitive; every whole-token keyword
/// occurrence starts a new record. No legality or ordering of clauses is
/// checked here.
///
/// Known limitation: a keyword token inside a string literal or property
/// value is indistinguishable from a real clause boundary and will start a
/// new record.
pub fn split(query: &str) -> Vec<Clause> {
    let bytes = query.as_bytes();
    let mut marks: Vec<(usize, ClauseKind)> = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        let at_token_start = is_ident_byte(bytes[i]) && (i == 0 || !is_ident_byte(bytes[i - 1]));
        if at_token_start {
            if let Some((kind, len)) = keyword_at(&query[i..]) {
                marks.push((i, kind));
                i += len;
                continue;
            }
        }
        i += 1;
    }

    let mut clauses = Vec::with_capacity(marks.len());
    for (n, &(start, kind)) in marks.iter().enumerate() {
        let end = marks.get(n + 1).map_or(query.len(), |&(next, _)| next);
        clauses.push(Clause {
            kind,
            text: query[start..end].trim().to_string(),
            entities: Vec::new(),
        });
    }
    clauses
}
