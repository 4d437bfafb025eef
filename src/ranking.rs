//! Leaderboard ordering and tier assignment.
//!
//! Ranking is recomputed from the full record set on every read, never
//! updated incrementally. The order is score descending (longer stare wins)
//! with a stable sort, so records with equal scores keep the order they were
//! read from the store.

use crate::leaderboard::ScoreRecord;
use serde::Serialize;
use std::fmt;

/// Medal classification assigned by rank position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Rank 1
    Gold,
    /// Rank 2
    Silver,
    /// Rank 3
    Bronze,
    /// Rank 4 and below
    Participant,
}

impl Tier {
    /// Tier for a 1-based rank.
    ///
    /// A pure function of the rank number; small leaderboards simply produce
    /// fewer entries, there is no medal list to index out of bounds.
    #[must_use]
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Tier::Gold,
            2 => Tier::Silver,
            3 => Tier::Bronze,
            _ => Tier::Participant,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Gold => "gold",
            Tier::Silver => "silver",
            Tier::Bronze => "bronze",
            Tier::Participant => "participant",
        };
        write!(f, "{name}")
    }
}

/// One display row: a record with its computed rank and tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// The underlying stored record
    pub record: ScoreRecord,
    /// 1-based position in the ordering
    pub rank: usize,
    /// Medal classification for the rank
    pub tier: Tier,
}

/// Turns stored records into a stable display order
pub struct RankEngine;

impl RankEngine {
    /// Rank records by score descending with insertion-order tie-breaking.
    ///
    /// Deterministic: the same input always yields the same output order.
    /// An empty record set yields an empty ranking.
    #[must_use]
    pub fn rank(records: &[ScoreRecord]) -> Vec<RankedEntry> {
        let mut ordered: Vec<ScoreRecord> = records.to_vec();
        // sort_by is stable; ties keep the order records were read in
        ordered.sort_by(|a, b| b.score.total_cmp(&a.score));

        ordered
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let rank = index + 1;
                RankedEntry {
                    record,
                    rank,
                    tier: Tier::for_rank(rank),
                }
            })
            .collect()
    }

    /// Rank of the given username in the current record set, if present
    #[must_use]
    pub fn rank_of(records: &[ScoreRecord], username: &str) -> Option<RankedEntry> {
        Self::rank(records)
            .into_iter()
            .find(|entry| entry.record.username == username)
    }
}
