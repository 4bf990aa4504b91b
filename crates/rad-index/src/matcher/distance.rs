//! Semi-global edit distance: the best alignment of a pattern against any substring.

use std::{mem, ops::Range};

/// Best alignment of a pattern inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Alignment {
    /// Edit distance between the pattern and the aligned span.
    pub(crate) distance: usize,
    /// Aligned span, in character indices into the text.
    pub(crate) span: Range<usize>,
}

/// One dynamic-programming cell: cost so far and where the alignment started.
#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Edit cost.
    cost: usize,
    /// Text index the alignment started at.
    start: usize,
}

impl Cell {
    /// Returns a cell one edit more expensive than `self`.
    fn plus_one(self) -> Self {
        Self {
            cost: self.cost + 1,
            start: self.start,
        }
    }
}

/// Returns the cheapest cell, preferring earlier arguments on ties.
fn cheapest(a: Cell, b: Cell, c: Cell) -> Cell {
    let ab = if b.cost < a.cost { b } else { a };
    if c.cost < ab.cost { c } else { ab }
}

/// Finds the lowest-cost alignment of `pattern` against any substring of `text`.
///
/// Returns `None` when no alignment costs at most `max_distance`. Among equally cheap
/// alignments the one ending first wins, extended to a later end when the same start
/// reaches it at the same cost.
pub(crate) fn best_alignment(
    pattern: &[char],
    text: &[char],
    max_distance: usize,
) -> Option<Alignment> {
    let m = pattern.len();
    if m == 0 || m > text.len() + max_distance {
        return None;
    }

    let mut prev: Vec<Cell> = (0..=m).map(|i| Cell { cost: i, start: 0 }).collect();
    let mut next = prev.clone();
    let mut best: Option<Alignment> = None;

    for (j, &tc) in text.iter().enumerate() {
        next[0] = Cell {
            cost: 0,
            start: j + 1,
        };
        for i in 1..=m {
            let diagonal = Cell {
                cost: prev[i - 1].cost + usize::from(pattern[i - 1] != tc),
                start: prev[i - 1].start,
            };
            next[i] = cheapest(diagonal, next[i - 1].plus_one(), prev[i].plus_one());
        }

        let end = next[m];
        let improves = best.as_ref().is_none_or(|b| {
            end.cost < b.distance || (end.cost == b.distance && end.start == b.span.start)
        });
        if end.cost <= max_distance && improves {
            best = Some(Alignment {
                distance: end.cost,
                span: end.start..j + 1,
            });
            if end.cost == 0 {
                break;
            }
        }
        mem::swap(&mut prev, &mut next);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn align(pattern: &str, text: &str, max: usize) -> Option<Alignment> {
        best_alignment(&chars(pattern), &chars(text), max)
    }

    #[test]
    fn exact_substring_anywhere() {
        let a = align("OMASI", "DCT OMASI GERSA", 0).unwrap();
        assert_eq!(a.distance, 0);
        assert_eq!(a.span, 4..9);
    }

    #[test]
    fn one_substitution() {
        let a = align("OMASY", "DCT OMASI GERSA", 1).unwrap();
        assert_eq!(a.distance, 1);
        assert_eq!(a.span, 4..9);
    }

    #[test]
    fn one_missing_character() {
        let a = align("UN869", "VIA UN69 ONLY", 1).unwrap();
        assert_eq!(a.distance, 1);
        assert_eq!(a.span, 4..8);
    }

    #[test]
    fn too_many_edits() {
        assert_eq!(align("ABC", "XYZ", 0), None);
        assert_eq!(align("OMASI", "GERSA", 1), None);
    }

    #[test]
    fn pattern_longer_than_reach() {
        assert_eq!(align("ABCDEFG", "ABC", 2), None);
        assert_eq!(align("", "ABC", 2), None);
    }

    #[test]
    fn substitution_at_end_is_covered() {
        let a = align("GERSX", "GERSA", 1).unwrap();
        assert_eq!(a.distance, 1);
        assert_eq!(a.span, 0..5);
    }

    #[test]
    fn earliest_of_equal_matches() {
        let a = align("AB", "AB AB", 0).unwrap();
        assert_eq!(a.span, 0..2);
    }
}
