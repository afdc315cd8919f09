//! Canonical session labels
//!
//! Raw `TYPE` cells arrive with inconsistent casing and spacing
//! (`"ms3: numerical methods"`, `"plenary talk"`). Canonicalization turns
//! them into one display form per session and extracts the `MS<digits>`
//! code used for ordering.

use crate::error::{TalkMapError, TalkMapResult};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Prefix that marks a coded (numbered) session.
pub const CODED_PREFIX: &str = "MS";

/// What to do with a label that starts with the coded prefix but has no `:`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLabelPolicy {
    /// Fail the run with `MalformedCategoryLabel`.
    #[default]
    Reject,
    /// Treat the label as an ordinary, non-coded label.
    PlainLabel,
}

/// Canonical, display-ready form of a raw session type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryLabel {
    /// Display form, e.g. `"MS3: Numerical Methods"`
    pub display: String,
    /// Extracted code, e.g. `"MS3"`; the display text when there is none
    pub code: String,
}

impl CategoryLabel {
    /// Whether this label follows the `MS<digits>: Subtitle` convention.
    pub fn is_coded(&self) -> bool {
        self.code != self.display
    }
}

/// Canonicalize a raw label, rejecting malformed coded labels.
pub fn canonicalize(raw: &str) -> TalkMapResult<CategoryLabel> {
    canonicalize_with(raw, MalformedLabelPolicy::Reject)
}

/// Canonicalize a raw label under an explicit malformed-label policy.
pub fn canonicalize_with(raw: &str, policy: MalformedLabelPolicy) -> TalkMapResult<CategoryLabel> {
    let trimmed = raw.trim();

    let display = if trimmed.to_uppercase().starts_with(CODED_PREFIX) {
        match trimmed.split_once(':') {
            Some((prefix, rest)) => {
                format!("{}: {}", prefix.to_uppercase(), title_case(rest.trim()))
            }
            None => match policy {
                MalformedLabelPolicy::Reject => {
                    return Err(TalkMapError::MalformedCategoryLabel {
                        label: raw.to_string(),
                    })
                }
                MalformedLabelPolicy::PlainLabel => title_case(trimmed),
            },
        }
    } else {
        title_case(trimmed)
    };

    let code = extract_code(&display);
    Ok(CategoryLabel { display, code })
}

/// Leading `MS<digits>` code of a label, upper-cased.
///
/// Fails open: when no code is present the input is returned unchanged.
pub fn extract_code(text: &str) -> String {
    static CODE: OnceLock<Regex> = OnceLock::new();
    let pattern = CODE.get_or_init(|| Regex::new(r"^MS\d+").expect("static pattern compiles"));

    let upper = text.to_uppercase();
    match pattern.find(&upper) {
        Some(m) => m.as_str().to_string(),
        None => text.to_string(),
    }
}

/// Capitalize each word: the first letter of every run of letters is
/// upper-cased and the rest lower-cased. Any non-letter starts a new run.
///
/// Letters whose upper case is several characters keep only the first one
/// upper-cased (`"ßa"` becomes `"Ssa"`), so the result is a fixed point.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if !ch.is_alphabetic() {
            out.push(ch);
            in_word = false;
            continue;
        }
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            let mut upper = ch.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        }
        // Word runs follow the emitted text; a lower-case mapping may end in a combining mark.
        in_word = out.chars().next_back().is_some_and(char::is_alphabetic);
    }
    out
}
