//! PEGREG fixture constructors.
//!
//! These are test fixtures, not core surface (spec.md §6/§9): a
//! PEG→FST compiler is explicitly out of scope. What follows is just
//! enough machinery -- ordinary NFA subset construction over a fixed
//! `(A/B)K` shape -- to build the three worked examples from spec.md §8
//! as genuine deterministic tapes, without hand-transcribing per-state
//! byte tables.
//!
//! [`pegreg_a_or_b_k`] builds both the plain `(A/B)K` fixture and its
//! "diffmatch" variant (different `A`/`B` choice of alternative changes
//! which output is emitted) from the same constructor, per SPEC_FULL.md's
//! ruling on the spec's "duplicate construction idioms" note: the source's
//! two near-duplicate, partly-buggy fixture files are not reproduced here.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use std::collections::{BTreeSet, HashMap, VecDeque};

use pegfst_kernel::builder::{clear_instr, finish, outgoing, set_final_flags, set_initial_flags, set_outchar, set_outstate};
use pegfst_kernel::tape::Tape;

/// Build the identity transducer `a:a` (spec.md §8 scenario 1): state 0
/// transitions to 1 on `'a'` (emitting `'a'`) and to 2 on anything else;
/// state 1 is `FINAL` and self-loops to 2 on everything; state 2 is dead.
#[must_use]
pub fn identity_transducer() -> Tape {
    let mut tape = Tape::new();

    clear_instr(&mut tape, 2);
    set_initial_flags(&mut tape);
    let h = outgoing(&mut tape, b'a');
    set_outstate(&mut tape, h, 1);
    set_outchar(&mut tape, h, b'a');
    finish(&mut tape);

    clear_instr(&mut tape, 2);
    set_final_flags(&mut tape);
    finish(&mut tape);

    clear_instr(&mut tape, 2);
    finish(&mut tape);

    tape
}

/// One configuration of the underlying NFA for `(A/B)K`: either branch `A`
/// or branch `B` is still being matched (at byte offset `usize`), or `K`
/// is being matched after a completed `A` or `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Config {
    A(usize),
    B(usize),
    K(usize),
}

/// Epsilon-close a set of raw successor configs: a branch that just
/// completed (`A`/`B` reaching its own length) immediately hands off to
/// `K` at offset 0. `K` reaching its own length is the accepting
/// configuration and is kept as a member of the closed set.
fn close(initial: Vec<Config>, a_len: usize, b_len: usize, k_len: usize) -> BTreeSet<Config> {
    let mut result = BTreeSet::new();
    let mut stack = initial;
    while let Some(c) = stack.pop() {
        match c {
            Config::A(i) if i == a_len => stack.push(Config::K(0)),
            Config::B(i) if i == b_len => stack.push(Config::K(0)),
            other => {
                result.insert(other);
            }
        }
    }
    result
}

fn step(
    set: &BTreeSet<Config>,
    byte: u8,
    a: &[u8],
    b: &[u8],
    k: &[u8],
) -> BTreeSet<Config> {
    let mut next = Vec::new();
    for c in set {
        match *c {
            Config::A(i) if i < a.len() && a[i] == byte => next.push(Config::A(i + 1)),
            Config::B(i) if i < b.len() && b[i] == byte => next.push(Config::B(i + 1)),
            Config::K(i) if i < k.len() && k[i] == byte => next.push(Config::K(i + 1)),
            _ => {}
        }
    }
    close(next, a.len(), b.len(), k.len())
}

fn is_accepting(set: &BTreeSet<Config>, k_len: usize) -> bool {
    set.contains(&Config::K(k_len))
}

/// Build a deterministic transducer for `(A/B)K`: ordered choice between
/// literal byte strings `a` and `b`, followed by literal `k`, determinized
/// by plain NFA subset construction (regular-language semantics: any split
/// of the input across the two branches that makes the whole match succeed
/// is accepted, matching spec.md §8 scenarios 2 and 3).
///
/// Matched input bytes are echoed to the output verbatim (`outchar == byte`
/// on every live transition); transitions that kill every active
/// configuration fall through to the implicit dead state with `outchar = 0`.
#[must_use]
pub fn pegreg_a_or_b_k(a: &[u8], b: &[u8], k: &[u8]) -> Tape {
    let start = close(vec![Config::A(0), Config::B(0)], a.len(), b.len(), k.len());

    // First pass: enumerate reachable configuration sets by BFS, in the
    // order state indices must be assigned (state 0 == start, per the
    // matcher's "begin in state 0" contract).
    let mut order: Vec<BTreeSet<Config>> = vec![start.clone()];
    let mut index_of: HashMap<BTreeSet<Config>, u32> = HashMap::new();
    index_of.insert(start.clone(), 0);
    let mut queue: VecDeque<BTreeSet<Config>> = VecDeque::new();
    queue.push_back(start);

    // transitions[state][byte] = Some((target_state, output_byte))
    let mut transitions: Vec<[Option<(u32, u8)>; 256]> = vec![[None; 256]];

    while let Some(set) = queue.pop_front() {
        let state = index_of[&set];
        for byte in 0u8..=255 {
            let next = step(&set, byte, a, b, k);
            if next.is_empty() {
                continue;
            }
            let target = *index_of.entry(next.clone()).or_insert_with(|| {
                order.push(next.clone());
                transitions.push([None; 256]);
                queue.push_back(next.clone());
                order.len() as u32 - 1
            });
            transitions[state as usize][byte as usize] = Some((target, byte));
        }
    }

    let dead_state = order.len() as u16;
    let mut tape = Tape::new();

    for (state, set) in order.iter().enumerate() {
        clear_instr(&mut tape, dead_state);
        if state == 0 {
            set_initial_flags(&mut tape);
        }
        if is_accepting(set, k.len()) {
            set_final_flags(&mut tape);
        }
        for byte in 0u8..=255 {
            if let Some((target, out)) = transitions[state][byte as usize] {
                let h = outgoing(&mut tape, byte);
                set_outstate(&mut tape, h, target as u16);
                set_outchar(&mut tape, h, out);
            }
        }
        finish(&mut tape);
    }

    // The dead state: every byte self-loops, outchar stays 0 (the
    // clear_instr fill already expresses this).
    clear_instr(&mut tape, dead_state);
    finish(&mut tape);

    tape
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegfst_kernel::matcher::match_bytes;

    #[test]
    fn plain_a_or_b_k_scenario_2() {
        let tape = pegreg_a_or_b_k(b"aa", b"a", b"ab");

        let r = match_bytes(&tape, b"aab");
        assert_eq!(r.output, b"aab");
        assert!(r.accept);

        let r = match_bytes(&tape, b"ab");
        assert!(!r.accept);

        let r = match_bytes(&tape, b"xyz");
        assert_eq!(r.output, Vec::<u8>::new());
        assert!(!r.accept);
    }

    #[test]
    fn diffmatch_scenario_3() {
        let tape = pegreg_a_or_b_k(b"aa", b"ab", b"x");

        let r = match_bytes(&tape, b"aax");
        assert_eq!(r.output, b"aax");
        assert!(r.accept);

        let r = match_bytes(&tape, b"abx");
        assert_eq!(r.output, b"abx");
        assert!(r.accept);

        let r = match_bytes(&tape, b"ax");
        assert!(!r.accept);
    }
}
