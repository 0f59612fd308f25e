//! Static allele tables for the six coat color loci.

use crate::Locus;
use std::cmp::Ordering;

/// Valid allele tokens per locus, in `Locus::ALL` order.
pub const ALPHABETS: [(Locus, &[&str]); 6] = [
    (Locus::E, &["E", "e"]),
    (Locus::A, &["Ay", "at", "a"]),
    (Locus::B, &["B", "b"]),
    (Locus::D, &["D", "d"]),
    (Locus::M, &["M", "m"]),
    (Locus::S, &["n", "sp"]),
];

/// Dominance ranks at the agouti locus, most dominant first.
///
/// Only used to order a pair for display.
pub const AGOUTI_DOMINANCE: [(&str, u8); 3] = [("Ay", 0), ("at", 1), ("a", 2)];

// Tokens missing from a rank table sort after every ranked one.
const UNRANKED: u8 = 99;

pub const RECESSIVE_RED: &str = "e";
pub const SABLE: &str = "Ay";
pub const TAN_POINTS: &str = "at";
pub const RECESSIVE_BLACK: &str = "a";
pub const BROWN: &str = "b";
pub const DILUTE: &str = "d";
pub const MERLE: &str = "M";
pub const PIEBALD: &str = "sp";

/// The allele tokens accepted at `locus`.
pub fn alphabet(locus: Locus) -> &'static [&'static str] {
    ALPHABETS
        .iter()
        .find(|(l, _)| *l == locus)
        .map(|(_, alleles)| *alleles)
        .unwrap_or(&[])
}

pub fn is_valid(locus: Locus, allele: &str) -> bool {
    alphabet(locus).contains(&allele)
}

fn agouti_rank(allele: &str) -> u8 {
    AGOUTI_DOMINANCE
        .iter()
        .find(|(a, _)| *a == allele)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED)
}

/// Display order of two alleles at `locus`.
///
/// Dominance rank at A, byte order everywhere else.
pub fn display_order(locus: Locus, a: &str, b: &str) -> Ordering {
    match locus {
        Locus::A => agouti_rank(a).cmp(&agouti_rank(b)),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_locus_has_an_alphabet() {
        for locus in Locus::ALL.iter() {
            assert!(!alphabet(*locus).is_empty(), "{:?}", locus);
        }
    }

    #[test]
    fn test_agouti_order_follows_dominance() {
        assert_eq!(display_order(Locus::A, "a", "Ay"), Ordering::Greater);
        assert_eq!(display_order(Locus::A, "at", "a"), Ordering::Less);
        assert_eq!(display_order(Locus::A, "Ay", "Ay"), Ordering::Equal);
    }

    #[test]
    fn test_other_loci_use_byte_order() {
        assert_eq!(display_order(Locus::B, "b", "B"), Ordering::Greater);
        assert_eq!(display_order(Locus::S, "sp", "n"), Ordering::Greater);
    }

    #[test]
    fn test_is_valid_rejects_tokens_from_other_loci() {
        assert!(is_valid(Locus::S, "sp"));
        assert!(!is_valid(Locus::S, "M"));
        assert!(!is_valid(Locus::A, "A"));
    }
}
