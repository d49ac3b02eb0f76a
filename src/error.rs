use crate::tariff::{FeeCategory, Hour, Season};

/// Fatal conditions of a tariff estimation run.
#[derive(Debug, thiserror::Error)]
pub enum TariffError {
    /// The tariff document does not follow the schema.
    #[error("malformed tariff document: {0}")]
    MalformedInput(String),

    #[error("flat fee `{label}` is missing from `{category}`")]
    MissingFeeCategory { category: FeeCategory, label: &'static str },

    #[error("no levies are declared")]
    EmptyLevySet,

    /// The consumption profile has a gap, which means the reference table is corrupt.
    #[error("consumption profile has no weight for {season} at {hour}")]
    LookupMiss { season: Season, hour: Hour },

    #[error("corrupt consumption profile: {0}")]
    CorruptReference(String),
}
