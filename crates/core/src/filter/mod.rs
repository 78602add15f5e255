//! Candidate acceptance criteria.
//!
//! Every check here is pure: the same item, criteria and ownership answer
//! always produce the same verdict.

mod criteria;

pub use criteria::FilterCriteria;

use std::fmt;

use crate::catalog::{Difficulty, Item};
use crate::library::Library;

/// Why a candidate was turned down.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    MissingDifficulty { difficulty: Difficulty },
    BpmOutOfRange { bpm: f64 },
    DurationOutOfRange { duration: f64 },
    RatingTooLow { rating: f64 },
    TooFewDownloads { downloads: u64 },
    AlreadyOwned,
}

impl Rejection {
    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::MissingDifficulty { .. } => "missing_difficulty",
            Rejection::BpmOutOfRange { .. } => "bpm_out_of_range",
            Rejection::DurationOutOfRange { .. } => "duration_out_of_range",
            Rejection::RatingTooLow { .. } => "rating_too_low",
            Rejection::TooFewDownloads { .. } => "too_few_downloads",
            Rejection::AlreadyOwned => "already_owned",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingDifficulty { difficulty } => {
                write!(f, "no {} difficulty", difficulty)
            }
            Rejection::BpmOutOfRange { bpm } => write!(f, "bpm {} out of range", bpm),
            Rejection::DurationOutOfRange { duration } => {
                write!(f, "duration {}s out of range", duration)
            }
            Rejection::RatingTooLow { rating } => write!(f, "rating {} too low", rating),
            Rejection::TooFewDownloads { downloads } => {
                write!(f, "only {} downloads", downloads)
            }
            Rejection::AlreadyOwned => f.write_str("already downloaded"),
        }
    }
}

/// Evaluate `item` against `criteria`, stopping at the first failed check.
///
/// Checks run in this order: required difficulties, tempo, duration, rating,
/// downloads, ownership. All numeric bounds are inclusive. Without criteria
/// every item passes, owned or not.
pub fn evaluate(
    item: &Item,
    criteria: Option<&FilterCriteria>,
    library: &dyn Library,
) -> Result<(), Rejection> {
    let Some(criteria) = criteria else {
        return Ok(());
    };
    let meta = &item.metadata;

    if let Some(difficulty) = criteria
        .required_difficulties()
        .find(|d| !meta.difficulties.has(*d))
    {
        return Err(Rejection::MissingDifficulty { difficulty });
    }

    if meta.bpm < criteria.min_bpm || meta.bpm > criteria.max_bpm {
        return Err(Rejection::BpmOutOfRange { bpm: meta.bpm });
    }

    if meta.duration < criteria.min_duration || meta.duration > criteria.max_duration {
        return Err(Rejection::DurationOutOfRange {
            duration: meta.duration,
        });
    }

    if item.stats.rating < criteria.min_rating {
        return Err(Rejection::RatingTooLow {
            rating: item.stats.rating,
        });
    }

    if item.stats.downloads < criteria.min_downloads {
        return Err(Rejection::TooFewDownloads {
            downloads: item.stats.downloads,
        });
    }

    if library.is_owned(&item.id) {
        return Err(Rejection::AlreadyOwned);
    }

    Ok(())
}

/// Whether `item` passes every check in `criteria`.
pub fn accepts(item: &Item, criteria: Option<&FilterCriteria>, library: &dyn Library) -> bool {
    evaluate(item, criteria, library).is_ok()
}
