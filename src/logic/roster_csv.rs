//! CSV import/export of the roster and the confirmed round history.

use crate::models::{Member, Practice, Round, RotationError};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct MemberRow<'a> {
    sequence_number: u32,
    name: &'a str,
    active: bool,
}

#[derive(Deserialize)]
struct ImportRow {
    name: String,
    #[serde(default)]
    active: Option<bool>,
}

#[derive(Serialize)]
struct RoundRow {
    round_no: u32,
    court_no: Option<u32>,
    pair_a_1: Option<u32>,
    pair_a_2: Option<u32>,
    pair_b_1: Option<u32>,
    pair_b_2: Option<u32>,
    rests: String,
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, RotationError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| RotationError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RotationError::Csv(e.to_string()))
}

/// Roster as CSV with header `sequence_number,name,active`.
pub fn export_roster_csv(members: &[Member]) -> Result<String, RotationError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for m in members {
        writer.serialize(MemberRow {
            sequence_number: m.sequence_number,
            name: &m.name,
            active: m.active,
        })?;
    }
    finish(writer)
}

/// Add every row of `data` as a member. Needs a `name` column; `active` is optional.
///
/// Rows are validated before anything is added, so a bad row leaves the practice unchanged.
pub fn import_roster_csv(practice: &mut Practice, data: &str) -> Result<usize, RotationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let rows = reader
        .deserialize::<ImportRow>()
        .collect::<Result<Vec<_>, _>>()?;

    let mut staged = practice.clone();
    for row in &rows {
        let id = staged.add_member(&row.name)?;
        if row.active == Some(false) {
            staged.set_member_active(id, false)?;
        }
    }
    *practice = staged;
    log::info!("Practice {}: imported {} member(s)", practice.id, rows.len());
    Ok(rows.len())
}

/// Confirmed rounds, one row per court; rests (space separated) go on the first row of a round.
pub fn export_rounds_csv(rounds: &[Round]) -> Result<String, RotationError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for round in rounds {
        let rests = round
            .rests
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if round.courts.is_empty() {
            writer.serialize(RoundRow {
                round_no: round.round_no,
                court_no: None,
                pair_a_1: None,
                pair_a_2: None,
                pair_b_1: None,
                pair_b_2: None,
                rests,
            })?;
            continue;
        }
        for (i, court) in round.courts.iter().enumerate() {
            writer.serialize(RoundRow {
                round_no: round.round_no,
                court_no: Some(court.court_no),
                pair_a_1: Some(court.pair_a[0]),
                pair_a_2: Some(court.pair_a[1]),
                pair_b_1: Some(court.pair_b[0]),
                pair_b_2: Some(court.pair_b[1]),
                rests: if i == 0 { rests.clone() } else { String::new() },
            })?;
        }
    }
    finish(writer)
}
