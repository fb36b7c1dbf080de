use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{format_time, parse_time, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{LeadTime, Reminder};

pub fn insert_reminder(conn: &Connection, reminder: &Reminder) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO reminders (id, medication_id, time_of_day, lead_minutes, active)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            reminder.id.to_string(),
            reminder.medication_id.to_string(),
            format_time(&reminder.time_of_day),
            reminder.lead_time.minutes(),
            reminder.active as i32,
        ],
    )?;
    Ok(())
}

pub fn get_reminders_for_medication(
    conn: &Connection,
    medication_id: &Uuid,
) -> Result<Vec<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medication_id, time_of_day, lead_minutes, active
         FROM reminders WHERE medication_id = ?1
         ORDER BY lead_minutes ASC",
    )?;

    let rows = stmt.query_map(params![medication_id.to_string()], |row| {
        Ok(reminder_row(row))
    })?;

    let mut reminders = Vec::new();
    for row in rows {
        reminders.push(reminder_from_row(row??)?);
    }
    Ok(reminders)
}

pub fn set_reminder_active(
    conn: &Connection,
    id: &Uuid,
    active: bool,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE reminders SET active = ?1 WHERE id = ?2",
        params![active as i32, id.to_string()],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Reminder".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Internal row type for Reminder mapping
struct ReminderRow {
    id: String,
    medication_id: String,
    time_of_day: String,
    lead_minutes: i64,
    active: i32,
}

fn reminder_row(row: &Row) -> rusqlite::Result<ReminderRow> {
    Ok(ReminderRow {
        id: row.get(0)?,
        medication_id: row.get(1)?,
        time_of_day: row.get(2)?,
        lead_minutes: row.get(3)?,
        active: row.get(4)?,
    })
}

fn reminder_from_row(row: ReminderRow) -> Result<Reminder, DatabaseError> {
    Ok(Reminder {
        id: parse_uuid("id", &row.id)?,
        medication_id: parse_uuid("medication_id", &row.medication_id)?,
        time_of_day: parse_time("time_of_day", &row.time_of_day)?,
        lead_time: LeadTime::from_minutes(row.lead_minutes)?,
        active: row.active != 0,
    })
}
