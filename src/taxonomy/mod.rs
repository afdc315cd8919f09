//! Session taxonomy: canonical labels and their display order

mod canonical;
mod rank;

pub use canonical::{
    canonicalize, canonicalize_with, extract_code, title_case, CategoryLabel,
    MalformedLabelPolicy, CODED_PREFIX,
};
pub use rank::{rank_key, sort_categories, RankKey, CONTRIBUTED, PLENARY, UNNUMBERED};
