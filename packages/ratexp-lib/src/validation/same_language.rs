//! Bounded language comparison: enumerate every word up to a length and ask
//! both languages about it. Used to cross-check the exact algorithms in
//! tests.

use itertools::{Itertools, repeat_n};

use crate::automaton::{Language, Letter};

/// All words over `alphabet` of length `0..max_word_length`.
fn words<L: Letter>(alphabet: &[L], max_word_length: usize) -> impl Iterator<Item = Vec<L>> + '_ {
    (0..max_word_length).flat_map(move |length| {
        repeat_n(alphabet, length)
            .multi_cartesian_product()
            .map(|word| word.into_iter().cloned().collect_vec())
    })
}

fn assert_same_alphabet<L: Letter>(a: &impl Language<Letter = L>, b: &impl Language<Letter = L>) {
    assert_eq!(a.alphabet(), b.alphabet(), "Alphabets are not the same");
}

/// Checks if two languages agree on all words shorter than
/// `max_word_length`. Differing alphabets count as different languages.
pub fn same_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) -> bool {
    if a.alphabet() != b.alphabet() {
        return false;
    }

    words(a.alphabet(), max_word_length).all(|word| {
        let agree = a.accepts(&word) == b.accepts(&word);
        if !agree {
            tracing::debug!(?word, "languages disagree");
        }
        agree
    })
}

pub fn assert_same_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    assert_same_alphabet(a, b);

    for word in words(a.alphabet(), max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by `a` but not by `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by `b` but not by `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that `b` accepts exactly the words `a` rejects.
pub fn assert_inverse_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    assert_same_alphabet(a, b);

    for word in words(a.alphabet(), max_word_length) {
        let accepted = a.accepts(&word);
        assert_ne!(
            accepted,
            b.accepts(&word),
            "{:?} is {} by both `a` and `b`. Thus their languages are not inverse.",
            word,
            if accepted { "accepted" } else { "rejected" }
        );
    }
}

/// Assert that every word accepted by `a` is accepted by `b`. The alphabet of
/// `a` must be contained in the alphabet of `b`.
pub fn assert_subset_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    assert!(
        a.alphabet().iter().all(|letter| b.alphabet().contains(letter)),
        "Alphabet {:?} is not contained in {:?}",
        a.alphabet(),
        b.alphabet()
    );

    for word in words(a.alphabet(), max_word_length) {
        assert!(
            !a.accepts(&word) || b.accepts(&word),
            "{:?} is accepted by `a` but not by `b`. Thus the language of `a` is not a subset of `b`.",
            word
        );
    }
}
