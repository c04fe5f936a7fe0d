//! Evaluation of parsed regular expressions against the index.
//!
//! Every node evaluates to the set of its `(offset, length)` matches, found
//! without scanning the text: literals and classes are resolved by backward
//! search and offset recovery, concatenation joins match sets on offset
//! adjacency, and repetition closes the join iteratively. Whether a node
//! also matches the empty string is tracked separately, so zero-length
//! matches flow through concatenation but are never emitted.

use std::collections::BTreeSet;

use crate::regex::{Ast, RegexMatch};
use crate::text_indexes::SuccinctText;

/// Evaluates `ast` against `st`, returning all matches.
pub(crate) fn execute(st: &SuccinctText, ast: &Ast) -> BTreeSet<RegexMatch> {
    eval(st, ast)
        .set
        .into_iter()
        .map(|(offset, length)| RegexMatch::new(offset, length))
        .collect()
}

// Matches of a subexpression. The set holds only non-empty matches;
// `matches_empty` records whether the empty string matches too.
struct Eval {
    set: BTreeSet<(usize, usize)>,
    matches_empty: bool,
}

fn eval(st: &SuccinctText, ast: &Ast) -> Eval {
    match ast {
        Ast::Empty => Eval {
            set: BTreeSet::new(),
            matches_empty: true,
        },
        Ast::Literal(bytes) => Eval {
            set: find_literal(st, bytes),
            matches_empty: false,
        },
        Ast::Class(bytes) => Eval {
            set: find_any_byte(st, bytes),
            matches_empty: false,
        },
        Ast::Dot => Eval {
            set: find_any_byte(st, st.alphabet()),
            matches_empty: false,
        },
        Ast::Concat(a, b) => join(&eval(st, a), &eval(st, b)),
        Ast::Union(a, b) => {
            let mut ea = eval(st, a);
            let eb = eval(st, b);
            ea.set.extend(eb.set);
            ea.matches_empty |= eb.matches_empty;
            ea
        }
        Ast::Star(a) => Eval {
            set: closure(&eval(st, a).set),
            matches_empty: true,
        },
        Ast::Plus(a) => {
            let ea = eval(st, a);
            Eval {
                set: closure(&ea.set),
                matches_empty: ea.matches_empty,
            }
        }
    }
}

fn find_literal(st: &SuccinctText, bytes: &[u8]) -> BTreeSet<(usize, usize)> {
    debug_assert!(!bytes.is_empty());
    st.occurrences(bytes).map(|o| (o, bytes.len())).collect()
}

fn find_any_byte(st: &SuccinctText, bytes: &[u8]) -> BTreeSet<(usize, usize)> {
    let mut set = BTreeSet::new();
    for &b in bytes {
        set.extend(st.occurrences(&[b]).map(|o| (o, 1)));
    }
    set
}

// Concatenation: a match of `a` continues with every match of `b` starting
// where it ends. Empty sides pass the other side through.
fn join(a: &Eval, b: &Eval) -> Eval {
    let mut set = BTreeSet::new();
    for &(offset, len) in &a.set {
        let next = offset + len;
        for &(_, len2) in b.set.range((next, 0)..=(next, usize::MAX)) {
            set.insert((offset, len + len2));
        }
    }
    if a.matches_empty {
        set.extend(b.set.iter().copied());
    }
    if b.matches_empty {
        set.extend(a.set.iter().copied());
    }
    Eval {
        set,
        matches_empty: a.matches_empty && b.matches_empty,
    }
}

// One-or-more closure of `base` under adjacency joins. Lengths are positive
// and bounded by the text, so the fixpoint is reached in finitely many
// rounds.
fn closure(base: &BTreeSet<(usize, usize)>) -> BTreeSet<(usize, usize)> {
    let mut result = base.clone();
    let mut frontier: Vec<(usize, usize)> = base.iter().copied().collect();
    while let Some((offset, len)) = frontier.pop() {
        let next = offset + len;
        let extended: Vec<(usize, usize)> = base
            .range((next, 0)..=(next, usize::MAX))
            .map(|&(_, len2)| (offset, len + len2))
            .collect();
        for cand in extended {
            if result.insert(cand) {
                frontier.push(cand);
            }
        }
    }
    result
}
