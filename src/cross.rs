//! Crossing two parents.
//!
//! [`Cross::calculate`] checks the merle safety rule, expands the Punnett
//! squares of all six loci into every offspring genotype, names each one
//! and groups them by phenotype.

use crate::labels::{Labels, Language};
use crate::loci;
use crate::phenotype::interpret_with;
use crate::prelude::*;
use crate::punnett::{PunnettSquare, CELL_PROBABILITY};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// One entry of a cross result: every offspring genotype that shows the
/// same phenotype.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PhenotypeBucket {
    pub phenotype: String,
    /// Percentage, rounded to two decimals.
    pub probability: f64,
    /// Canonical display genotypes, first seen first, with carrier tags.
    pub genotypes: Vec<String>,
    /// Sorted, no duplicates.
    pub alerts: Vec<String>,
}

/// A configured cross calculator.
#[derive(Debug, Clone, Copy)]
pub struct Cross {
    language: Language,
}

impl Default for Cross {
    fn default() -> Self {
        CrossBuilder::new().build()
    }
}

pub struct CrossBuilder {
    language: Language,
}

impl CrossBuilder {
    /// Construct a new Cross builder
    pub fn new() -> Self {
        Self {
            language: Language::default(),
        }
    }

    /// Language of phenotype names, alerts, carrier tags and block reasons.
    pub fn language(&mut self, language: Language) -> &mut Self {
        self.language = language;
        self
    }

    pub fn build(&self) -> Cross {
        Cross {
            language: self.language,
        }
    }
}

impl Default for CrossBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates one phenotype while offspring are being named.
struct Bucket {
    phenotype: String,
    probability: Probability,
    seen: HashSet<Genotype>,
    genotypes: Vec<String>,
    alerts: BTreeSet<String>,
}

impl Bucket {
    fn new(phenotype: String) -> Self {
        Self {
            phenotype,
            probability: 0.0,
            seen: HashSet::new(),
            genotypes: vec![],
            alerts: BTreeSet::new(),
        }
    }

    fn into_result(self) -> PhenotypeBucket {
        PhenotypeBucket {
            phenotype: self.phenotype,
            probability: round_percentage(self.probability),
            genotypes: self.genotypes,
            alerts: self.alerts.into_iter().collect(),
        }
    }
}

// Hundredths of a percent in a probability of 1.
const PERCENT_UNITS: f64 = 10_000.0;

/// Probability as a percentage rounded to two decimals, half to even.
///
/// Offspring shares are multiples of 1/4096, so halfway values such as
/// 9.375% are exact and round to 9.38.
pub fn round_percentage(probability: Probability) -> f64 {
    (probability * PERCENT_UNITS).round_ties_even() / 100.0
}

impl Cross {
    fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    /// Refuses crosses that can produce, or involve, a double merle.
    pub fn validate(&self, parent1: &Genotype, parent2: &Genotype) -> CrossResult<()> {
        let m1 = parent1[Locus::M].count(loci::MERLE);
        let m2 = parent2[Locus::M].count(loci::MERLE);

        let cause = if m1 == 2 || m2 == 2 {
            BlockedCause::DoubleMerleParent
        } else if m1 >= 1 && m2 >= 1 {
            BlockedCause::MerleByMerle
        } else {
            return Ok(());
        };

        let reason = match cause {
            BlockedCause::DoubleMerleParent => self.labels().double_merle_blocked,
            BlockedCause::MerleByMerle => self.labels().merle_by_merle_blocked,
        };
        warn!(?cause, parent1 = %parent1, parent2 = %parent2, "cross blocked");
        Err(CrossError::Blocked {
            cause,
            reason: reason.to_owned(),
        })
    }

    /// Every offspring genotype with its probability.
    ///
    /// Enumerates all four cells of every locus's Punnett square, so the
    /// result always holds 4^6 entries, repeats included.
    pub fn offspring(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
    ) -> Vec<(Genotype, Probability)> {
        let squares: Vec<PunnettSquare> = Locus::ALL
            .iter()
            .map(|locus| PunnettSquare::new(*locus, parent1, parent2))
            .collect();

        let cells: Vec<Vec<&AllelePair>> = squares.iter().map(|s| s.cells().collect()).collect();
        let per_locus = cells.iter().map(|c| c.len()).product::<usize>();

        (0..per_locus)
            .map(|n| {
                // n read as a base-4 number, most significant digit at E
                let mut rest = n;
                let mut picks = [0usize; 6];
                for i in (0..cells.len()).rev() {
                    picks[i] = rest % cells[i].len();
                    rest /= cells[i].len();
                }
                let genotype = Genotype::from_valid_pairs(std::array::from_fn(|i| {
                    cells[i][picks[i]].clone()
                }));
                (genotype, CELL_PROBABILITY.powi(cells.len() as i32))
            })
            .collect()
    }

    /// Carrier tags for a genotype whose coat hides a recessive allele.
    pub fn carrier_tags(&self, genotype: &Genotype) -> Vec<&'static str> {
        let labels = self.labels();
        let mut tags = vec![];

        let agouti = &genotype[Locus::A];
        if agouti.contains(loci::SABLE)
            && (agouti.contains(loci::TAN_POINTS) || agouti.contains(loci::RECESSIVE_BLACK))
        {
            tags.push(labels.agouti_carrier);
        }
        if genotype[Locus::B].count(loci::BROWN) == 1 {
            tags.push(labels.brown_carrier);
        }
        if genotype[Locus::D].count(loci::DILUTE) == 1 {
            tags.push(labels.dilution_carrier);
        }
        tags
    }

    /// Canonical display form of `genotype`, with carrier tags appended.
    pub fn display_genotype(&self, genotype: &Genotype) -> String {
        let canonical = genotype.canonical();
        self.annotate(&canonical)
    }

    fn annotate(&self, canonical: &Genotype) -> String {
        let tags = self.carrier_tags(canonical);
        if tags.is_empty() {
            canonical.to_string()
        } else {
            format!(
                "{} – {}:{}",
                canonical,
                self.labels().carrier_prefix,
                tags.join(",")
            )
        }
    }

    /// Phenotype distribution of the offspring of `parent1` and `parent2`,
    /// most likely first.
    pub fn calculate(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
    ) -> CrossResult<Vec<PhenotypeBucket>> {
        self.validate(parent1, parent2)?;

        let (parent1, parent2) = (parent1.canonical(), parent2.canonical());
        let offspring = self.offspring(&parent1, &parent2);
        debug!(candidates = offspring.len(), "expanded offspring");

        let labels = self.labels();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut buckets: Vec<Bucket> = vec![];

        for (genotype, probability) in offspring {
            let phenotype = interpret_with(&genotype, labels);
            let slot = *index.entry(phenotype.label.clone()).or_insert_with(|| {
                buckets.push(Bucket::new(phenotype.label.clone()));
                buckets.len() - 1
            });
            let bucket = &mut buckets[slot];

            bucket.probability += probability;
            bucket.alerts.extend(phenotype.alerts);

            let signature = genotype.canonical();
            if !bucket.seen.contains(&signature) {
                bucket.genotypes.push(self.annotate(&signature));
                bucket.seen.insert(signature);
            }
        }

        let mut results: Vec<PhenotypeBucket> =
            buckets.into_iter().map(Bucket::into_result).collect();
        results.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.phenotype.cmp(&b.phenotype))
        });
        debug!(phenotypes = results.len(), "aggregated cross");
        Ok(results)
    }
}

/// Phenotype distribution of a cross, with English labels.
pub fn calculate(parent1: &Genotype, parent2: &Genotype) -> CrossResult<Vec<PhenotypeBucket>> {
    Cross::default().calculate(parent1, parent2)
}
