//! ESG impact ratings keyed by consensus mechanism
//!
//! Compliance logic modeled on MiCAR ESG disclosure requirements: the
//! consensus mechanism of the underlying chain is used as a proxy for the
//! instrument's environmental impact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the underlying chain validates transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsensusMechanism {
    ProofOfWork,
    ProofOfStake,
    /// No chain involved (ETFs, tokenized traditional assets)
    NotApplicable,
    /// Anything the engine does not recognize
    Unknown,
}

impl fmt::Display for ConsensusMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ProofOfWork => "PoW",
            Self::ProofOfStake => "PoS",
            Self::NotApplicable => "N/A",
            Self::Unknown => "Unknown",
        };
        write!(f, "{label}")
    }
}

impl FromStr for ConsensusMechanism {
    type Err = std::convert::Infallible;

    /// Total parse: unrecognized labels map to [`ConsensusMechanism::Unknown`]
    /// rather than failing, so upstream data never aborts the pipeline.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pow" | "proof of work" | "proof-of-work" => Self::ProofOfWork,
            "pos" | "proof of stake" | "proof-of-stake" => Self::ProofOfStake,
            "n/a" | "na" | "none" => Self::NotApplicable,
            _ => Self::Unknown,
        })
    }
}

/// ESG impact rating for an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EsgRating {
    /// 0-100, higher is lower impact
    pub score: u8,
    /// Short human-readable grade
    pub rating: &'static str,
}

/// Look up the ESG rating for a consensus mechanism.
pub fn esg_rating(mechanism: ConsensusMechanism) -> EsgRating {
    match mechanism {
        ConsensusMechanism::ProofOfStake => EsgRating {
            score: 85,
            rating: "A (Low Impact)",
        },
        ConsensusMechanism::ProofOfWork => EsgRating {
            score: 30,
            rating: "C (High Energy)",
        },
        ConsensusMechanism::NotApplicable => EsgRating {
            score: 100,
            rating: "A+ (Neutral)",
        },
        ConsensusMechanism::Unknown => EsgRating {
            score: 0,
            rating: "Unrated",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_table_matches_micar_mapping() {
        assert_eq!(
            esg_rating(ConsensusMechanism::ProofOfStake),
            EsgRating {
                score: 85,
                rating: "A (Low Impact)"
            }
        );
        assert_eq!(
            esg_rating(ConsensusMechanism::ProofOfWork),
            EsgRating {
                score: 30,
                rating: "C (High Energy)"
            }
        );
        assert_eq!(
            esg_rating(ConsensusMechanism::NotApplicable),
            EsgRating {
                score: 100,
                rating: "A+ (Neutral)"
            }
        );
    }

    #[test]
    fn unknown_mechanism_falls_back_to_unrated() {
        assert_eq!(
            esg_rating(ConsensusMechanism::Unknown),
            EsgRating {
                score: 0,
                rating: "Unrated"
            }
        );
    }

    #[test]
    fn parse_is_total_and_case_insensitive() {
        assert_eq!(
            "PoW".parse::<ConsensusMechanism>().unwrap(),
            ConsensusMechanism::ProofOfWork
        );
        assert_eq!(
            "proof-of-stake".parse::<ConsensusMechanism>().unwrap(),
            ConsensusMechanism::ProofOfStake
        );
        assert_eq!(
            "N/A".parse::<ConsensusMechanism>().unwrap(),
            ConsensusMechanism::NotApplicable
        );
        assert_eq!(
            "delegated-bft".parse::<ConsensusMechanism>().unwrap(),
            ConsensusMechanism::Unknown
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mech in [
            ConsensusMechanism::ProofOfWork,
            ConsensusMechanism::ProofOfStake,
            ConsensusMechanism::NotApplicable,
        ] {
            assert_eq!(mech.to_string().parse::<ConsensusMechanism>().unwrap(), mech);
        }
    }
}
