use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{format_datetime, parse_date, parse_datetime, parse_uuid};
use crate::db::DatabaseError;
use crate::models::DoseOccurrence;

pub fn insert_occurrence(conn: &Connection, occ: &DoseOccurrence) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO dose_occurrences (id, medication_id, day, scheduled_at, taken, recorded_dose)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            occ.id.to_string(),
            occ.medication_id.to_string(),
            occ.day.to_string(),
            format_datetime(&occ.scheduled_at),
            occ.taken as i32,
            occ.recorded_dose,
        ],
    )?;
    Ok(())
}

/// The occurrence for (medication, day), if one exists.
pub fn get_occurrence(
    conn: &Connection,
    medication_id: &Uuid,
    day: NaiveDate,
) -> Result<Option<DoseOccurrence>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medication_id, day, scheduled_at, taken, recorded_dose
         FROM dose_occurrences WHERE medication_id = ?1 AND day = ?2",
    )?;

    let result = stmt.query_row(
        params![medication_id.to_string(), day.to_string()],
        |row| Ok(occurrence_row(row)),
    );

    match result {
        Ok(row) => Ok(Some(occurrence_from_row(row?)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set_occurrence_taken(
    conn: &Connection,
    id: &Uuid,
    taken: bool,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE dose_occurrences SET taken = ?1 WHERE id = ?2",
        params![taken as i32, id.to_string()],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "DoseOccurrence".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Dose history for a medication, oldest day first.
pub fn occurrences_for_medication(
    conn: &Connection,
    medication_id: &Uuid,
) -> Result<Vec<DoseOccurrence>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medication_id, day, scheduled_at, taken, recorded_dose
         FROM dose_occurrences WHERE medication_id = ?1
         ORDER BY day ASC",
    )?;

    let rows = stmt.query_map(params![medication_id.to_string()], |row| {
        Ok(occurrence_row(row))
    })?;

    let mut occurrences = Vec::new();
    for row in rows {
        occurrences.push(occurrence_from_row(row??)?);
    }
    Ok(occurrences)
}

// Internal row type for DoseOccurrence mapping
struct OccurrenceRow {
    id: String,
    medication_id: String,
    day: String,
    scheduled_at: String,
    taken: i32,
    recorded_dose: f64,
}

fn occurrence_row(row: &Row) -> rusqlite::Result<OccurrenceRow> {
    Ok(OccurrenceRow {
        id: row.get(0)?,
        medication_id: row.get(1)?,
        day: row.get(2)?,
        scheduled_at: row.get(3)?,
        taken: row.get(4)?,
        recorded_dose: row.get(5)?,
    })
}

fn occurrence_from_row(row: OccurrenceRow) -> Result<DoseOccurrence, DatabaseError> {
    Ok(DoseOccurrence {
        id: parse_uuid("id", &row.id)?,
        medication_id: parse_uuid("medication_id", &row.medication_id)?,
        day: parse_date("day", &row.day)?,
        scheduled_at: parse_datetime("scheduled_at", &row.scheduled_at)?,
        taken: row.taken != 0,
        recorded_dose: row.recorded_dose,
    })
}
