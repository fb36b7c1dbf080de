//! Calendar view data: one entry per active reminder, joined with its
//! medication, filterable to the days the medication is prescribed.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository::{parse_date, parse_time, parse_uuid};
use crate::db::DatabaseError;
use crate::schedule::MedicationSchedule;

/// A reminder entry for the calendar screen.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub reminder_id: Uuid,
    pub medication_id: Uuid,
    pub title: String,
    pub time_of_day: NaiveTime,
}

/// All events from active reminders, earliest time of day first.
pub fn build_events(conn: &Connection) -> Result<Vec<CalendarEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.medication_id, m.name, r.time_of_day
         FROM reminders r
         INNER JOIN medications m ON r.medication_id = m.id
         WHERE r.active = 1
         ORDER BY r.time_of_day ASC, m.name ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut events = Vec::new();
    for row in rows {
        let (id, medication_id, title, time_of_day) = row?;
        events.push(CalendarEvent {
            reminder_id: parse_uuid("id", &id)?,
            medication_id: parse_uuid("medication_id", &medication_id)?,
            title,
            time_of_day: parse_time("time_of_day", &time_of_day)?,
        });
    }
    Ok(events)
}

/// Events for one calendar day: active reminders of medications whose
/// active window covers `day`.
pub fn events_for_date(
    conn: &Connection,
    day: NaiveDate,
) -> Result<Vec<CalendarEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.medication_id, m.name, r.time_of_day, m.start_date, m.end_date
         FROM reminders r
         INNER JOIN medications m ON r.medication_id = m.id
         WHERE r.active = 1
         ORDER BY r.time_of_day ASC, m.name ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, Option<String>>(5)?,
        ))
    })?;

    let mut events = Vec::new();
    for row in rows {
        let (id, medication_id, title, time_of_day, start_date, end_date) = row?;
        let time_of_day = parse_time("time_of_day", &time_of_day)?;
        let schedule = MedicationSchedule::new(
            parse_date("start_date", &start_date)?,
            end_date.map(|s| parse_date("end_date", &s)).transpose()?,
            time_of_day,
        );
        if !schedule.is_active_on(day) {
            continue;
        }
        events.push(CalendarEvent {
            reminder_id: parse_uuid("id", &id)?,
            medication_id: parse_uuid("medication_id", &medication_id)?,
            title,
            time_of_day,
        });
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::db::repository::{insert_medication, insert_reminder, set_reminder_active};
    use crate::db::sqlite::open_memory_database;
    use crate::models::{LeadTime, Medication, Reminder};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn insert_medication_with_reminder(
        conn: &Connection,
        name: &str,
        dose_time: NaiveTime,
        end_date: Option<NaiveDate>,
    ) -> (Uuid, Uuid) {
        let med = Medication {
            id: Uuid::new_v4(),
            name: name.to_string(),
            dose_amount: 1.0,
            dose_unit: "unit".to_string(),
            start_date: date(2024, 1, 10),
            end_date,
            notes: None,
            dose_time,
        };
        insert_medication(conn, &med).unwrap();

        let reminder = Reminder {
            id: Uuid::new_v4(),
            medication_id: med.id,
            time_of_day: dose_time,
            lead_time: LeadTime::TenMinutes,
            active: true,
        };
        insert_reminder(conn, &reminder).unwrap();
        (med.id, reminder.id)
    }

    #[test]
    fn events_sorted_by_time_of_day() {
        let conn = open_memory_database().unwrap();
        insert_medication_with_reminder(
            &conn,
            "Evening",
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            None,
        );
        insert_medication_with_reminder(
            &conn,
            "Morning",
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            None,
        );

        let events = build_events(&conn).unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Morning", "Evening"]);
    }

    #[test]
    fn inactive_reminders_are_excluded() {
        let conn = open_memory_database().unwrap();
        let (_, reminder_id) = insert_medication_with_reminder(
            &conn,
            "Paused",
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            None,
        );
        set_reminder_active(&conn, &reminder_id, false).unwrap();

        assert!(build_events(&conn).unwrap().is_empty());
    }

    #[test]
    fn events_for_date_respects_active_windows() {
        let conn = open_memory_database().unwrap();
        insert_medication_with_reminder(
            &conn,
            "Bounded",
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Some(date(2024, 1, 12)),
        );
        insert_medication_with_reminder(
            &conn,
            "Ongoing",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            None,
        );

        let in_window = events_for_date(&conn, date(2024, 1, 11)).unwrap();
        assert_eq!(in_window.len(), 2);

        let past_window = events_for_date(&conn, date(2024, 2, 1)).unwrap();
        let titles: Vec<&str> = past_window.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Ongoing"]);
    }
}
