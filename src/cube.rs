//! The move executor: a cube, its named sequences and its running history.
//!
//! Execution is cooperative. Tokens are queued with [`Cube::enqueue`] and each
//! call to [`Cube::step`] performs at most one atomic move before yielding, so
//! a host can redraw or stop between moves. A move is never left half done.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{NotationError, SequenceError};
use crate::geometry::Layer;
use crate::grid::CubeGrid;
use crate::kinds::CubeType;
use crate::layers::LayerTable;
use crate::notation::{is_atomic, parse_atomic, reverse_sequence, Move};
use crate::sequences::SequenceMap;
use crate::simplify::simplify;

/// Deepest a named sequence may expand into other named sequences.
pub const NESTING_LIMIT: usize = 64;

/// Scramble length used when none is given.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 50;

/// Queued work. Depth 0 is a token the host enqueued directly.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Token {
        text: String,
        depth: usize,
    },
    /// Remaining repetitions of a named sequence body, expanded one at a time.
    Repeat {
        tokens: Vec<String>,
        remaining: u64,
        depth: usize,
    },
}

impl Pending {
    fn depth(&self) -> usize {
        match self {
            Pending::Token { depth, .. } | Pending::Repeat { depth, .. } => *depth,
        }
    }
}

/// A cube of type `T` together with its move history.
///
/// History is the simplified record of every atomic move performed since the
/// cube was created (or reset), so reversing it undoes the net effect.
pub struct Cube<T: CubeType> {
    kind: T,
    grid: CubeGrid,
    layers: LayerTable,
    sequences: SequenceMap,
    history: String,
    pending: VecDeque<Pending>,
    rejected: Vec<NotationError>,
}

impl<T: CubeType> Cube<T> {
    pub fn new(kind: T) -> Self {
        Self::with_sequences(kind, SequenceMap::new())
    }

    pub fn with_sequences(kind: T, sequences: SequenceMap) -> Self {
        Self {
            grid: CubeGrid::new(kind.dims()),
            layers: kind.layer_table(),
            kind,
            sequences,
            history: String::new(),
            pending: VecDeque::new(),
            rejected: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn sequences(&self) -> &SequenceMap {
        &self.sequences
    }

    pub fn edit_sequence(&mut self, name: &str, body: &str) -> Result<(), SequenceError> {
        self.sequences.edit(name, body)
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Back to a solved grid with empty history. Named sequences are kept.
    pub fn reset(&mut self) {
        self.grid = CubeGrid::new(self.kind.dims());
        self.history.clear();
        self.pending.clear();
        self.rejected.clear();
    }

    /// Queues every whitespace-separated token of `sequence`.
    pub fn enqueue(&mut self, sequence: &str) {
        self.pending
            .extend(sequence.split_whitespace().map(|text| Pending::Token {
                text: text.to_owned(),
                depth: 0,
            }));
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Works through the queue until one atomic move has been performed.
    ///
    /// Returns the canonical move, or `None` once the queue is empty. Invalid
    /// tokens are logged, kept for [`Cube::take_rejected`] and skipped.
    ///
    /// The unit is the whole canonical move rather than each quarter turn, so
    /// a caller that stops stepping never sees a grid half way through `R2`
    /// with the history already claiming it.
    pub fn step(&mut self) -> Option<Move> {
        while let Some(pending) = self.pending.pop_front() {
            match pending {
                Pending::Token { text, depth } => {
                    if let Some(mv) = self.dispatch(&text, depth) {
                        return Some(mv);
                    }
                }
                Pending::Repeat {
                    tokens,
                    remaining,
                    depth,
                } => self.expand(tokens, remaining, depth),
            }
        }
        None
    }

    /// Errors for tokens skipped since the last call.
    pub fn take_rejected(&mut self) -> Vec<NotationError> {
        std::mem::take(&mut self.rejected)
    }

    /// Runs `sequence` (and anything already queued) to completion.
    ///
    /// Returns the errors for every skipped token; the rest of the sequence
    /// still runs.
    pub fn do_sequence(&mut self, sequence: &str) -> Vec<NotationError> {
        self.enqueue(sequence);
        while self.step().is_some() {}
        self.take_rejected()
    }

    /// Performs a single atomic token right away, bypassing the queue.
    ///
    /// Returns `Ok(None)` for tokens that turn nothing, such as `R4`.
    pub fn do_move(&mut self, token: &str) -> Result<Option<Move>, NotationError> {
        let mv = parse_atomic(token)?;
        if let Some(mv) = mv {
            self.apply(mv);
        }
        Ok(mv)
    }

    /// Performs `length` random moves and returns them.
    pub fn scramble(&mut self, length: usize) -> String {
        self.scramble_with(length, &mut rand::thread_rng())
    }

    /// Like [`Cube::scramble`], drawing from `rng`.
    pub fn scramble_with<R: Rng + ?Sized>(&mut self, length: usize, rng: &mut R) -> String {
        let scramble = random_sequence(length, rng);
        info!(length, "scrambling");
        self.do_sequence(&scramble);
        scramble
    }

    /// The sequence that would undo the current history.
    pub fn solution(&self) -> String {
        reverse_sequence(&self.history)
    }

    /// Finishes any queued work, then undoes the history. Returns the moves
    /// performed to get there.
    pub fn solve(&mut self) -> String {
        while self.step().is_some() {}
        let solution = self.solution();
        info!(moves = %solution, "solving");
        self.do_sequence(&solution);
        solution
    }

    fn dispatch(&mut self, token: &str, depth: usize) -> Option<Move> {
        info!(token, depth, "doing move");
        if is_atomic(token) {
            return match parse_atomic(token) {
                Ok(Some(mv)) => {
                    self.apply(mv);
                    Some(mv)
                }
                Ok(None) => None,
                Err(e) => {
                    self.reject(e);
                    None
                }
            };
        }

        let call = self
            .sequences
            .resolve(token)
            .map(|call| call.map(|call| (call.tokens(), call.repeat)));
        match call {
            Ok(Some(_)) if depth >= NESTING_LIMIT => {
                self.reject(NotationError::NestingTooDeep {
                    token: token.to_owned(),
                    limit: NESTING_LIMIT,
                });
                // drop what is left of the enclosing top-level token
                while self.pending.front().is_some_and(|p| p.depth() > 0) {
                    self.pending.pop_front();
                }
                // and its remaining repetitions
                if matches!(self.pending.front(), Some(Pending::Repeat { depth: 0, .. })) {
                    self.pending.pop_front();
                }
            }
            Ok(Some((tokens, remaining))) => self.pending.push_front(Pending::Repeat {
                tokens,
                remaining,
                depth,
            }),
            Ok(None) => self.reject(NotationError::InvalidToken(token.to_owned())),
            Err(e) => self.reject(e),
        }
        None
    }

    fn expand(&mut self, tokens: Vec<String>, remaining: u64, depth: usize) {
        if remaining == 0 {
            return;
        }
        if remaining > 1 {
            self.pending.push_front(Pending::Repeat {
                tokens: tokens.clone(),
                remaining: remaining - 1,
                depth,
            });
        }
        for text in tokens.into_iter().rev() {
            self.pending.push_front(Pending::Token {
                text,
                depth: depth + 1,
            });
        }
    }

    /// Records `mv` in history, then turns the grid.
    fn apply(&mut self, mv: Move) {
        self.history = simplify(&format!("{} {mv}", self.history));
        for turn in self.kind.quarter_turns(mv) {
            debug!(layer = %turn.layer, invert = turn.invert, "quarter turn");
            self.kind.turn(&mut self.grid, &self.layers, turn);
        }
    }

    fn reject(&mut self, error: NotationError) {
        warn!(%error, "skipping token");
        self.rejected.push(error);
    }
}

/// `length` random quarter turns over every move letter, each primed with
/// even odds.
pub fn random_sequence<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| {
            let layer = Layer::ALL[rng.gen_range(0..Layer::ALL.len())];
            let mark = if rng.gen_bool(0.5) { "'" } else { "" };
            format!("{layer}{mark}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::kinds::ThreeByThree;
    use crate::notation::Turn;
    use crate::pieces::{Color, Face};

    fn cube() -> Cube<ThreeByThree> {
        Cube::new(ThreeByThree)
    }

    fn sides(cube: &Cube<ThreeByThree>) -> Vec<Vec<Color>> {
        Face::ALL.iter().map(|&f| cube.grid().side(f)).collect()
    }

    #[test]
    fn test_fresh_cube_is_solved() {
        let cube = cube();
        assert!(cube.is_solved());
        assert_eq!(cube.history(), "");
        assert!(cube.is_idle());
    }

    #[test]
    fn test_every_single_move_unsolves() {
        for layer in Layer::ALL {
            let mut cube = cube();
            assert!(cube.do_sequence(&layer.to_string()).is_empty());
            assert!(!cube.is_solved(), "{layer} left the cube solved");
        }
    }

    #[test]
    fn test_sequence_then_solve_restores() {
        let mut cube = cube();
        cube.do_sequence("R U F'");
        assert_eq!(cube.history(), "R U F'");
        assert!(!cube.is_solved());
        assert_eq!(cube.solve(), "F U' R'");
        assert!(cube.is_solved());
        assert_eq!(cube.history(), "");
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for layer in Layer::ALL {
            let mut cube = cube();
            cube.do_sequence(&format!("{layer} {layer} {layer} {layer}"));
            assert!(cube.is_solved(), "{layer} has order other than 4");
            assert_eq!(cube.history(), "");
        }
    }

    #[test]
    fn test_two_quarter_turns_equal_half_turn() {
        for layer in Layer::ALL {
            let mut twice = cube();
            twice.do_sequence(&format!("{layer} {layer}"));
            let mut half = cube();
            half.do_sequence(&format!("{layer}2"));
            assert_eq!(twice.grid(), half.grid());
            assert_eq!(twice.history(), half.history());
        }
    }

    #[test]
    fn test_prime_undoes_move() {
        for layer in Layer::ALL {
            let mut cube = cube();
            cube.do_sequence(&format!("{layer} {layer}'"));
            assert!(cube.is_solved(), "{layer}' does not undo {layer}");
        }
    }

    #[test]
    fn test_repeat_counts_canonicalize() {
        let mut cube = cube();
        cube.do_sequence("R3 U6' F4");
        assert_eq!(cube.history(), "R' U2");
    }

    #[test]
    fn test_invalid_tokens_are_skipped() {
        let mut cube = cube();
        let errors = cube.do_sequence("R x U'' F");
        assert_eq!(
            errors,
            vec![
                NotationError::InvalidToken("x".to_owned()),
                NotationError::InvalidToken("U''".to_owned()),
            ]
        );
        assert_eq!(cube.history(), "R F");

        let mut only_invalid = Cube::new(ThreeByThree);
        only_invalid.do_sequence("nope");
        assert!(only_invalid.is_solved());
        assert_eq!(only_invalid.history(), "");
    }

    #[test]
    fn test_do_move_is_immediate() {
        let mut cube = cube();
        assert_eq!(
            cube.do_move("R'"),
            Ok(Some(Move::new(Layer::R, Turn::CounterClockwise)))
        );
        assert_eq!(cube.do_move("R4"), Ok(None));
        assert!(cube.do_move("sune").is_err());
        assert_eq!(cube.history(), "R'");
    }

    #[test]
    fn test_named_sequences_with_repeat_and_prime() {
        let mut cube = cube();
        cube.edit_sequence("sexy", "R U R' U'").unwrap();
        cube.do_sequence("sexy6");
        assert!(cube.is_solved(), "R U R' U' has order 6");

        cube.reset();
        cube.do_sequence("sexy sexy'");
        assert!(cube.is_solved());
        assert_eq!(cube.history(), "");

        cube.do_sequence("sexy2");
        let mut spelled = Cube::new(ThreeByThree);
        spelled.do_sequence("R U R' U' R U R' U'");
        assert_eq!(cube.grid(), spelled.grid());
        assert_eq!(cube.history(), spelled.history());
    }

    #[test]
    fn test_nested_sequences() {
        let mut cube = cube();
        cube.edit_sequence("a", "R U").unwrap();
        cube.edit_sequence("b", "a a'").unwrap();
        cube.edit_sequence("c", "b2 F").unwrap();
        assert!(cube.do_sequence("c").is_empty());
        assert_eq!(cube.history(), "F");
    }

    #[test]
    fn test_zero_repeat_runs_nothing() {
        let mut cube = cube();
        cube.edit_sequence("a", "R U").unwrap();
        assert!(cube.do_sequence("a0").is_empty());
        assert!(cube.is_solved());
    }

    #[test]
    fn test_self_reference_hits_nesting_limit() {
        let mut cube = cube();
        cube.edit_sequence("loop", "loop loop").unwrap();
        let errors = cube.do_sequence("loop R");
        assert_eq!(
            errors,
            vec![NotationError::NestingTooDeep {
                token: "loop".to_owned(),
                limit: NESTING_LIMIT
            }]
        );
        // the rest of the top-level sequence still runs
        assert_eq!(cube.history(), "R");
        assert!(cube.is_idle());
    }

    #[test]
    fn test_nesting_limit_drops_remaining_repeats() {
        let mut cube = cube();
        cube.edit_sequence("loop", "loop loop").unwrap();
        cube.edit_sequence("x", "R loop U").unwrap();

        assert_eq!(cube.do_sequence("loop3").len(), 1);
        assert_eq!(cube.history(), "");

        let errors = cube.do_sequence("x2 F");
        assert_eq!(
            errors,
            vec![NotationError::NestingTooDeep {
                token: "loop".to_owned(),
                limit: NESTING_LIMIT
            }]
        );
        assert_eq!(cube.history(), "R F");
        assert!(cube.is_idle());
    }

    #[test]
    fn test_step_yields_after_each_move() {
        let mut cube = cube();
        cube.enqueue("R bogus U2 F0 F");
        assert_eq!(cube.step(), "R".parse().ok());
        assert_eq!(cube.history(), "R");
        assert_eq!(cube.step(), Move::from_canonical("U2"));
        assert_eq!(cube.take_rejected().len(), 1);
        assert_eq!(cube.step(), Move::from_canonical("F"));
        assert_eq!(cube.step(), None);
        assert!(cube.is_idle());
    }

    #[test]
    fn test_seeded_scramble_then_solve() {
        let mut cube = cube();
        let mut rng = StdRng::seed_from_u64(7);
        let scramble = cube.scramble_with(DEFAULT_SCRAMBLE_LENGTH, &mut rng);
        assert_eq!(scramble.split_whitespace().count(), DEFAULT_SCRAMBLE_LENGTH);
        let quarter_turns = scramble
            .split_whitespace()
            .filter_map(Move::from_canonical)
            .filter(|mv| mv.turn != Turn::Half)
            .count();
        assert_eq!(quarter_turns, DEFAULT_SCRAMBLE_LENGTH);
        cube.solve();
        assert!(cube.is_solved());
        assert_eq!(cube.history(), "");
    }

    #[test]
    fn test_reset() {
        let mut cube = cube();
        cube.edit_sequence("a", "R").unwrap();
        cube.do_sequence("a U");
        cube.enqueue("bogus F");
        assert_eq!(cube.step(), Move::from_canonical("F"));
        cube.enqueue("D");
        cube.reset();
        assert!(cube.is_solved());
        assert!(cube.is_idle());
        assert!(cube.take_rejected().is_empty());
        assert_eq!(cube.history(), "");
        assert_eq!(cube.sequences().get("a"), Some("R"));
    }

    #[test]
    fn test_sides_after_r() {
        let mut cube = cube();
        cube.do_sequence("R");
        insta::assert_snapshot!(cube.grid().format_faces(), @r"
        U: WWG WWG WWG
        L: OOO OOO OOO
        F: GGY GGY GGY
        R: RRR RRR RRR
        B: WBB WBB WBB
        D: YYB YYB YYB
        ");
    }

    #[test]
    fn test_sides_after_u() {
        let mut cube = cube();
        cube.do_sequence("U");
        insta::assert_snapshot!(cube.grid().format_faces(), @r"
        U: WWW WWW WWW
        L: GGG OOO OOO
        F: RRR GGG GGG
        R: BBB RRR RRR
        B: OOO BBB BBB
        D: YYY YYY YYY
        ");
    }

    #[test]
    fn test_sides_after_r_u_f_prime() {
        let mut cube = cube();
        cube.do_sequence("R U F'");
        insta::assert_snapshot!(cube.grid().format_faces(), @r"
        U: WWW WWW WRR
        L: GGG OOG OOG
        F: RYY RGG RGG
        R: BBB YRR YRR
        B: OOO WBB WBB
        D: YOO YYB YYB
        ");
    }

    #[test]
    fn test_history_replay_reproduces_state() {
        let mut cube = cube();
        cube.scramble_with(20, &mut StdRng::seed_from_u64(1));
        let mut replayed = Cube::new(ThreeByThree);
        replayed.do_sequence(cube.history());
        assert_eq!(sides(&cube), sides(&replayed));
    }
}
