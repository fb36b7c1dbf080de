use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{format_time, parse_date, parse_time, parse_uuid};
use crate::db::DatabaseError;
use crate::models::Medication;

pub fn insert_medication(conn: &Connection, med: &Medication) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medications (id, name, dose_amount, dose_unit, start_date, end_date, notes, dose_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            med.id.to_string(),
            med.name,
            med.dose_amount,
            med.dose_unit,
            med.start_date.to_string(),
            med.end_date.map(|d| d.to_string()),
            med.notes,
            format_time(&med.dose_time),
        ],
    )?;
    Ok(())
}

pub fn get_medication(conn: &Connection, id: &Uuid) -> Result<Option<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dose_amount, dose_unit, start_date, end_date, notes, dose_time
         FROM medications WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| Ok(medication_row(row)));

    match result {
        Ok(row) => Ok(Some(medication_from_row(row?)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All medications in insertion order (rowid is stable for this schema).
pub fn list_medications(conn: &Connection) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dose_amount, dose_unit, start_date, end_date, notes, dose_time
         FROM medications ORDER BY rowid ASC",
    )?;

    let rows = stmt.query_map([], |row| Ok(medication_row(row)))?;

    let mut meds = Vec::new();
    for row in rows {
        meds.push(medication_from_row(row??)?);
    }
    Ok(meds)
}

/// Delete a medication; reminders and dose occurrences cascade via FK.
pub fn delete_medication(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM medications WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(())
}

// Internal row type for Medication mapping
struct MedicationRow {
    id: String,
    name: String,
    dose_amount: f64,
    dose_unit: String,
    start_date: String,
    end_date: Option<String>,
    notes: Option<String>,
    dose_time: String,
}

fn medication_row(row: &Row) -> rusqlite::Result<MedicationRow> {
    Ok(MedicationRow {
        id: row.get(0)?,
        name: row.get(1)?,
        dose_amount: row.get(2)?,
        dose_unit: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        notes: row.get(6)?,
        dose_time: row.get(7)?,
    })
}

fn medication_from_row(row: MedicationRow) -> Result<Medication, DatabaseError> {
    Ok(Medication {
        id: parse_uuid("id", &row.id)?,
        name: row.name,
        dose_amount: row.dose_amount,
        dose_unit: row.dose_unit,
        start_date: parse_date("start_date", &row.start_date)?,
        end_date: row
            .end_date
            .map(|s| parse_date("end_date", &s))
            .transpose()?,
        notes: row.notes,
        dose_time: parse_time("dose_time", &row.dose_time)?,
    })
}
