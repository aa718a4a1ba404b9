//! Fixpoint rewriting of move histories.
//!
//! Letters sharing an axis (`L R M`, `U E D`, `F S B`) are assumed to commute,
//! so two turns of the same letter separated only by same-axis turns can be
//! merged or cancelled. Turns on another axis always block a merge.

use std::fmt;

use tracing::debug;

use crate::notation::{Move, Turn};

/// A history token: a canonical move, or text the rules never touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term<'a> {
    Move(Move),
    Other(&'a str),
}

impl<'a> Term<'a> {
    fn parse(token: &'a str) -> Self {
        Move::from_canonical(token).map_or(Term::Other(token), Term::Move)
    }
}

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Move(mv) => write!(f, "{mv}"),
            Term::Other(text) => f.write_str(text),
        }
    }
}

/// `N<open> run N<close>` becomes `N<result> run`, or just `run` when the
/// pair cancels.
struct Rule {
    open: Turn,
    close: Turn,
    result: Option<Turn>,
}

const fn rule(open: Turn, close: Turn, result: Option<Turn>) -> Rule {
    Rule {
        open,
        close,
        result,
    }
}

const RULES: [Rule; 9] = {
    use Turn::{Clockwise as Cw, CounterClockwise as Ccw, Half};
    [
        rule(Ccw, Cw, None),
        rule(Cw, Ccw, None),
        rule(Half, Half, None),
        rule(Cw, Cw, Some(Half)),
        rule(Ccw, Ccw, Some(Half)),
        rule(Cw, Half, Some(Ccw)),
        rule(Ccw, Half, Some(Cw)),
        rule(Half, Cw, Some(Ccw)),
        rule(Half, Ccw, Some(Cw)),
    ]
};

/// Simplifies a whitespace-separated history until no rule applies.
///
/// The output is single-space separated with no leading or trailing space.
/// Simplifying an already simplified string returns it unchanged.
pub fn simplify(history: &str) -> String {
    let mut terms: Vec<Term<'_>> = history.split_whitespace().map(Term::parse).collect();
    let before = terms.len();
    // every rewrite removes at least one term, so this terminates
    while let Some(next) = rewrite_pass(&terms) {
        terms = next;
    }
    if terms.len() != before {
        debug!(removed = before - terms.len(), "simplified history");
    }
    terms
        .iter()
        .map(Term::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies every rule once over the whole term list, in rule order.
fn rewrite_pass<'a>(terms: &[Term<'a>]) -> Option<Vec<Term<'a>>> {
    let mut changed = false;
    let mut current = terms.to_vec();
    for rule in &RULES {
        if let Some(next) = apply_rule(&current, rule) {
            current = next;
            changed = true;
        }
    }
    changed.then_some(current)
}

/// One left-to-right, non-overlapping scan for a single rule.
fn apply_rule<'a>(terms: &[Term<'a>], rule: &Rule) -> Option<Vec<Term<'a>>> {
    let mut output = Vec::with_capacity(terms.len());
    let mut changed = false;
    let mut i = 0;
    while i < terms.len() {
        if let Term::Move(open) = terms[i] {
            if open.turn == rule.open {
                if let Some(close) = find_close(terms, i, open, rule.close) {
                    if let Some(turn) = rule.result {
                        output.push(Term::Move(Move::new(open.layer, turn)));
                    }
                    output.extend_from_slice(&terms[i + 1..close]);
                    changed = true;
                    i = close + 1;
                    continue;
                }
            }
        }
        output.push(terms[i]);
        i += 1;
    }
    changed.then_some(output)
}

/// Index of the first `open.layer` turn matching `close` after `start`,
/// reachable through same-axis moves only.
fn find_close(terms: &[Term<'_>], start: usize, open: Move, close: Turn) -> Option<usize> {
    let axis = open.layer.axis();
    for (offset, term) in terms[start + 1..].iter().enumerate() {
        match *term {
            Term::Move(mv) if mv.layer == open.layer && mv.turn == close => {
                return Some(start + 1 + offset)
            }
            Term::Move(mv) if mv.layer.axis() == axis => {}
            _ => return None,
        }
    }
    None
}
