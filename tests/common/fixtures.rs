//! Roster fixtures

use std::path::{Path, PathBuf};
use talkmap::RawTalkRow;

pub const ROSTER_HEADER: &str = "TITLE,ABSTRACT,TYPE,FIRST_NAME,LAST_NAME";

/// A small but messy roster: inconsistent casing, duplicated sessions,
/// an unnumbered session and empty cells.
pub fn roster_csv() -> String {
    [
        ROSTER_HEADER,
        "Expander Graphs,Spectral gaps and mixing,ms10: graph theory,Ada,Lovelace",
        "Opening Keynote,Where the field is heading,plenary talk,Kurt,Godel",
        "Proof Search,Automated theorem proving,MS2: logic,Alan,Turing",
        "Poster Blitz,,Poster Session,Grace,",
        "Lightning Round,Short updates,CONTRIBUTED TALK,Emmy,Noether",
        "Graph Minors,Structure theorems,MS10: Graph Theory,Paul,Erdos",
        "Model Theory,Types and saturation,ms2:LOGIC,Julia,Robinson",
        "Krylov Solvers,Sparse linear systems,ms3: numerical methods,John,Neumann",
    ]
    .join("\n")
}

/// Write `content` to `name` inside `dir`.
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("fixture write");
    path
}

/// Rows with the given session types and titles `Talk 0..n`.
pub fn talk_rows(types: &[&str]) -> Vec<RawTalkRow> {
    types
        .iter()
        .enumerate()
        .map(|(i, t)| RawTalkRow {
            title: Some(format!("Talk {}", i)),
            abstract_text: Some(format!("abstract number {}", i)),
            raw_type: Some(t.to_string()),
            first_name: Some("Speaker".to_string()),
            last_name: Some(i.to_string()),
        })
        .collect()
}
