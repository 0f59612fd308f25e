//! Error types

use thiserror::Error;

pub type CrossResult<T> = Result<T, CrossError>;
pub type GenotypeResult<T> = Result<T, GenotypeError>;

/// Why a cross was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedCause {
    /// One of the parents is `M/M`.
    DoubleMerleParent,
    /// Both parents carry at least one `M`.
    MerleByMerle,
}

/// Errors raised while computing a cross.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossError {
    #[error("{reason}")]
    Blocked { cause: BlockedCause, reason: String },
}

impl CrossError {
    pub fn kind(&self) -> BlockedCause {
        match self {
            CrossError::Blocked { cause, .. } => *cause,
        }
    }
}

/// Errors raised while building a `Genotype` from outside data.
#[derive(Debug, Error)]
pub enum GenotypeError {
    #[error("Missing locus: {0}")]
    MissingLocus(String),

    #[error("Unknown locus: {0}")]
    UnknownLocus(String),

    #[error("Locus {0} given more than once")]
    DuplicateLocus(String),

    #[error("Unknown allele {allele:?} at locus {locus}")]
    UnknownAllele { locus: String, allele: String },

    #[error("Locus {locus} needs exactly two alleles, got {found}")]
    PairArity { locus: String, found: usize },

    #[error("Malformed genotype field: {0}")]
    Malformed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A language code with no label table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown language: {0} (expected en or pt)")]
pub struct UnknownLanguage(pub String);
