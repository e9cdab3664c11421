//! Roster import: participants from CSV with header `id,name,avatar`.

use crate::models::{Participant, ParticipantId};
use serde::Deserialize;
use std::io::Read;
use uuid::Uuid;

#[derive(Debug)]
pub enum RosterError {
    Csv(csv::Error),
    /// A row has no name. `line` is 1-based and counts the header.
    EmptyName { line: u64 },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid roster CSV: {}", e),
            RosterError::EmptyName { line } => write!(f, "Roster line {} has no name", line),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

#[derive(Deserialize)]
struct RosterRow {
    #[serde(default)]
    id: Option<ParticipantId>,
    name: String,
    #[serde(default)]
    avatar: Option<String>,
}

/// Parse participants in file order. Rows without an id get a fresh one.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<Participant>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut participants = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: RosterRow = record.deserialize(Some(&headers))?;
        let name = row.name.trim();
        if name.is_empty() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(RosterError::EmptyName { line });
        }
        participants.push(Participant {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            display_name: name.to_string(),
            avatar_ref: row.avatar.filter(|a| !a.is_empty()),
        });
    }
    Ok(participants)
}
