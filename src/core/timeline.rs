use crate::models::medication::Medication;
use crate::models::medication_log::MedicationLog;
use crate::models::timeline::{DaySchedule, TimelineEvent};
use crate::utils::date::{date_of, start_of_day_ms};
use chrono::{NaiveDate, TimeZone};
use std::collections::{BTreeMap, HashMap};

/// Display order of events and of day buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "oldest" => Some(SortOrder::Asc),
            "desc" | "newest" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Dose ordinal and day total for every log id.
///
/// Logs are partitioned by (calendar day in `tz`, medication); inside a
/// partition the earliest dose is number 1. Equal timestamps fall back to
/// the log id so the numbering is stable.
pub fn dose_ordinals<Tz: TimeZone>(
    logs: &[&MedicationLog],
    tz: &Tz,
) -> HashMap<i64, (usize, usize)> {
    let mut partitions: HashMap<(NaiveDate, i64), Vec<&MedicationLog>> = HashMap::new();
    for log in logs {
        if let Some(day) = date_of(tz, log.timestamp) {
            partitions
                .entry((day, log.medication_id))
                .or_default()
                .push(*log);
        }
    }

    let mut out = HashMap::with_capacity(logs.len());
    for (_, mut part) in partitions {
        part.sort_by_key(|l| (l.timestamp, l.id));
        let total = part.len();
        for (i, log) in part.into_iter().enumerate() {
            out.insert(log.id, (i + 1, total));
        }
    }
    out
}

/// Build the day-grouped timeline.
///
/// Logs whose medication is not in `medications` are dropped, as are
/// timestamps that cannot be placed on a calendar day. The result is a
/// pure projection of the inputs.
pub fn build_timeline<Tz: TimeZone>(
    medications: &[Medication],
    logs: &[MedicationLog],
    tz: &Tz,
    order: SortOrder,
) -> Vec<DaySchedule> {
    let meds: HashMap<i64, &Medication> = medications.iter().map(|m| (m.id, m)).collect();

    let known: Vec<&MedicationLog> = logs
        .iter()
        .filter(|l| meds.contains_key(&l.medication_id))
        .collect();

    let ordinals = dose_ordinals(&known, tz);

    let mut events: Vec<(NaiveDate, TimelineEvent)> = known
        .iter()
        .filter_map(|log| {
            let day = date_of(tz, log.timestamp)?;
            let med = meds.get(&log.medication_id)?;
            let (dose_number, total_doses) = *ordinals.get(&log.id)?;
            Some((
                day,
                TimelineEvent {
                    log_id: log.id,
                    medication: (*med).clone(),
                    timestamp: log.timestamp,
                    dose_number,
                    total_doses,
                },
            ))
        })
        .collect();

    events.sort_by_key(|(_, e)| (e.timestamp, e.log_id));
    if order == SortOrder::Desc {
        events.reverse();
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<TimelineEvent>> = BTreeMap::new();
    for (day, ev) in events {
        by_day.entry(day).or_default().push(ev);
    }

    let days = by_day
        .into_iter()
        .map(|(date, events)| {
            let day_start = start_of_day_ms(tz, date)
                .ok()
                .or_else(|| events.iter().map(|e| e.timestamp).min())
                .unwrap_or_default();
            DaySchedule {
                date,
                day_start,
                day_number: date.format("%d").to_string(),
                month_short: date.format("%b").to_string().to_uppercase(),
                events,
            }
        });

    match order {
        SortOrder::Asc => days.collect(),
        SortOrder::Desc => days.rev().collect(),
    }
}
