pub use crate::cross::{calculate, Cross, CrossBuilder, PhenotypeBucket};
pub use crate::error::{
    BlockedCause, CrossError, CrossResult, GenotypeError, GenotypeResult,
};
pub use crate::labels::Language;
pub use crate::phenotype::{interpret, Phenotype};
pub use crate::{AllelePair, Genotype, Locus, Probability};
