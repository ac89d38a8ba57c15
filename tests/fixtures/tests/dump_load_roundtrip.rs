//! spec.md §8 scenario 4: build the `(A/B)K` fixture, dump it, load it back,
//! and check that matching the same inputs against both tapes agrees.

use pegfst_fixtures::pegreg_a_or_b_k;
use pegfst_kernel::io::{dump, load};
use pegfst_kernel::matcher::match_bytes;

#[test]
fn dump_load_round_trip_preserves_match_behavior() {
    let tape = pegreg_a_or_b_k(b"aa", b"a", b"ab");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pegreg.fst");
    dump(&tape, &path).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(loaded.length(), tape.length());

    for input in [&b"aab"[..], b"ab", b"xyz"] {
        let original = match_bytes(&tape, input);
        let reloaded = match_bytes(&loaded, input);
        assert_eq!(original, reloaded, "mismatch for input {input:?}");
    }
}

#[test]
fn dump_load_round_trip_is_byte_exact() {
    let tape = pegreg_a_or_b_k(b"aa", b"ab", b"x");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diffmatch.fst");
    dump(&tape, &path).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(loaded.length(), tape.length());
    for n in 0..tape.length() {
        for b in 0..=255u8 {
            assert_eq!(loaded.entry(n, b), tape.entry(n, b));
        }
    }
}
