//! Total ordering over canonical session labels
//!
//! Plenary first, contributed second, then every other session by the
//! number in its `MS<digits>` code. Labels with no number sort last.

use super::canonical::extract_code;
use serde::Serialize;
use std::collections::HashSet;

/// Display label of the plenary session.
pub const PLENARY: &str = "Plenary Talk";
/// Display label of the contributed session.
pub const CONTRIBUTED: &str = "Contributed Talk";
/// Secondary key for labels that carry no number.
pub const UNNUMBERED: u64 = 999;

/// Sort key over display labels.
///
/// Ordered lexicographically on `(tier, secondary)`. `secondary` is always
/// zero for the plenary and contributed tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RankKey {
    tier: u8,
    secondary: u64,
}

impl RankKey {
    pub const PLENARY_TIER: u8 = 0;
    pub const CONTRIBUTED_TIER: u8 = 1;
    pub const SESSION_TIER: u8 = 2;

    pub fn tier(&self) -> u8 {
        self.tier
    }

    pub fn secondary(&self) -> u64 {
        self.secondary
    }
}

/// Compute the rank key of a canonical display label.
pub fn rank_key(display: &str) -> RankKey {
    match display {
        PLENARY => RankKey {
            tier: RankKey::PLENARY_TIER,
            secondary: 0,
        },
        CONTRIBUTED => RankKey {
            tier: RankKey::CONTRIBUTED_TIER,
            secondary: 0,
        },
        _ => RankKey {
            tier: RankKey::SESSION_TIER,
            secondary: first_number(&extract_code(display)).unwrap_or(UNNUMBERED),
        },
    }
}

/// First run of ASCII digits in `text`, saturating at `u64::MAX`.
fn first_number(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = text[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Unique labels in legend order.
///
/// Duplicates collapse to their first occurrence; labels with equal keys keep
/// the order in which they first appeared.
pub fn sort_categories<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = labels
        .into_iter()
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect();
    unique.sort_by_key(|label| rank_key(label));
    unique
}
