#![crate_name = "canis_locus"]
//! Offspring coat color probabilities for canine crosses.
//!
//! A cross expands every offspring genotype two parents can produce across
//! the six coat color loci (`E`, `A`, `B`, `D`, `M`, `S`), names the coat
//! each genotype shows, and ranks the resulting phenotypes by probability.
//!
//! ```
//! use canis_locus::prelude::*;
//!
//! let sire: Genotype = "E:E/E A:Ay/at B:B/b D:D/d M:M/m S:n/n".parse().unwrap();
//! let dam: Genotype = "E:E/e A:at/a B:b/b D:d/d M:m/m S:sp/n".parse().unwrap();
//! let buckets = calculate(&sire, &dam).unwrap();
//! assert!(buckets.iter().any(|b| b.phenotype.contains("merle")));
//! ```
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

pub mod prelude;

pub mod cross;
pub mod error;
pub mod labels;
pub mod loci;
pub mod observable;
pub mod phenotype;
pub mod punnett;

pub use cross::{calculate, Cross, CrossBuilder, PhenotypeBucket};
pub use error::{BlockedCause, CrossError, CrossResult, GenotypeError, GenotypeResult};
pub use phenotype::{interpret, Phenotype};

/// Probability of a genotype or phenotype, in `0.0..=1.0`.
pub type Probability = f64;

/// A coat color locus.
///
/// Variants are declared in display order, so the derived `Ord` is the
/// order used for signatures and display strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Locus {
    /// Extension
    E,
    /// Agouti
    A,
    /// Brown
    B,
    /// Dilution
    D,
    /// Merle
    M,
    /// White spotting
    S,
}

impl Locus {
    pub const ALL: [Locus; 6] = [Locus::E, Locus::A, Locus::B, Locus::D, Locus::M, Locus::S];

    pub fn name(&self) -> &'static str {
        match self {
            Locus::E => "E",
            Locus::A => "A",
            Locus::B => "B",
            Locus::D => "D",
            Locus::M => "M",
            Locus::S => "S",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Locus {
    type Err = GenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locus::ALL
            .iter()
            .copied()
            .find(|locus| locus.name() == s.trim())
            .ok_or_else(|| GenotypeError::UnknownLocus(s.to_owned()))
    }
}

/// The two alleles an individual holds at one locus.
///
/// The pair is unordered biologically; the stored order only matters for
/// display, see [`AllelePair::canonical`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllelePair {
    alleles: [String; 2],
}

impl AllelePair {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            alleles: [first.into(), second.into()],
        }
    }

    pub fn first(&self) -> &str {
        &self.alleles[0]
    }

    pub fn second(&self) -> &str {
        &self.alleles[1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.alleles.iter().map(|a| a.as_str())
    }

    /// Number of copies of `allele` in the pair (0, 1 or 2).
    pub fn count(&self, allele: &str) -> usize {
        self.iter().filter(|a| *a == allele).count()
    }

    pub fn contains(&self, allele: &str) -> bool {
        self.count(allele) > 0
    }

    /// The same pair in display order for `locus`.
    pub fn canonical(&self, locus: Locus) -> Self {
        match loci::display_order(locus, self.first(), self.second()) {
            std::cmp::Ordering::Greater => Self::new(self.second(), self.first()),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first(), self.second())
    }
}

/// A complete assignment of allele pairs to all six loci.
///
/// A `Genotype` can only be built with every locus present and every
/// allele taken from that locus's alphabet, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "BTreeMap<Locus, Vec<String>>")]
pub struct Genotype {
    pairs: [AllelePair; 6],
}

impl Genotype {
    /// Builds a genotype from one pair per locus.
    ///
    /// Fails when a locus is missing or repeated, or an allele is not in
    /// the locus's alphabet.
    pub fn new<I>(pairs: I) -> GenotypeResult<Self>
    where
        I: IntoIterator<Item = (Locus, AllelePair)>,
    {
        let mut slots: [Option<AllelePair>; 6] = Default::default();
        for (locus, pair) in pairs {
            if let Some(allele) = pair.iter().find(|a| !loci::is_valid(locus, a)) {
                return Err(GenotypeError::UnknownAllele {
                    locus: locus.to_string(),
                    allele: allele.to_string(),
                });
            }
            let slot = &mut slots[locus.index()];
            if slot.is_some() {
                return Err(GenotypeError::DuplicateLocus(locus.to_string()));
            }
            *slot = Some(pair);
        }

        let pairs: [AllelePair; 6] = slots
            .into_iter()
            .zip(Locus::ALL)
            .map(|(slot, locus)| slot.ok_or_else(|| GenotypeError::MissingLocus(locus.to_string())))
            .collect::<GenotypeResult<Vec<_>>>()?
            .try_into()
            .map_err(|_| GenotypeError::Malformed("expected six loci".into()))?;
        Ok(Self { pairs })
    }

    /// Iterates over the loci in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Locus, &AllelePair)> {
        Locus::ALL.iter().copied().zip(self.pairs.iter())
    }

    /// The same genotype with every pair in display order.
    ///
    /// Two genotypes that differ only in the order of alleles inside a
    /// pair have equal canonical forms, which makes this the dedup key.
    pub fn canonical(&self) -> Self {
        Self {
            pairs: std::array::from_fn(|i| self.pairs[i].canonical(Locus::ALL[i])),
        }
    }

    /// Builds a child from pairs drawn from already validated parents,
    /// in `Locus::ALL` order.
    pub(crate) fn from_valid_pairs(pairs: [AllelePair; 6]) -> Self {
        Self { pairs }
    }
}

impl Index<Locus> for Genotype {
    type Output = AllelePair;

    fn index(&self, locus: Locus) -> &AllelePair {
        &self.pairs[locus.index()]
    }
}

/// `E:E/e – A:Ay/at – B:B/b – D:D/d – M:M/m – S:n/sp`
impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (locus, pair)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" – ")?;
            }
            write!(f, "{}:{}", locus, pair)?;
        }
        Ok(())
    }
}

/// Parses `E:E/e A:Ay/at B:B/b D:D/d M:m/m S:n/sp`.
///
/// Fields may be separated by whitespace, `|`, `,`, `;` or `–`, so the
/// `Display` form parses back.
impl FromStr for Genotype {
    type Err = GenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(|c: char| c.is_whitespace() || "|,;–".contains(c))
            .filter(|field| !field.is_empty());

        let mut pairs = vec![];
        for field in fields {
            let (locus, alleles) = field
                .split_once(':')
                .ok_or_else(|| GenotypeError::Malformed(field.to_owned()))?;
            let alleles: Vec<&str> = alleles.split('/').collect();
            let locus: Locus = locus.parse()?;
            pairs.push((locus, pair_from_slice(locus, &alleles)?));
        }
        Genotype::new(pairs)
    }
}

impl TryFrom<BTreeMap<Locus, Vec<String>>> for Genotype {
    type Error = GenotypeError;

    fn try_from(map: BTreeMap<Locus, Vec<String>>) -> Result<Self, Self::Error> {
        let pairs = map
            .iter()
            .map(|(locus, alleles)| {
                let alleles: Vec<&str> = alleles.iter().map(|a| a.as_str()).collect();
                Ok((*locus, pair_from_slice(*locus, &alleles)?))
            })
            .collect::<GenotypeResult<Vec<_>>>()?;
        Genotype::new(pairs)
    }
}

pub(crate) fn pair_from_slice(locus: Locus, alleles: &[&str]) -> GenotypeResult<AllelePair> {
    match alleles {
        [first, second] => Ok(AllelePair::new(first.trim(), second.trim())),
        _ => Err(GenotypeError::PairArity {
            locus: locus.to_string(),
            found: alleles.len(),
        }),
    }
}
