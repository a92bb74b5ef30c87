use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dose::DoseLogic;
use crate::core::medication::MedicationLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::{format_millis, now_ms, parse_at, to_millis, today};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Take { medication_id, at } = cmd {
        let timestamp = match at {
            Some(when) => to_millis(&Local, parse_at(when, today())?)?,
            None => now_ms(),
        };

        let pool = open_db(&cfg.database)?;
        let log_id = DoseLogic::take(&pool, *medication_id, timestamp)?;
        let med = MedicationLogic::get(&pool, *medication_id)?;

        success(format!(
            "💊 {} taken at {} (log #{}).",
            med.label(),
            format_millis(timestamp, "%Y-%m-%d %H:%M"),
            log_id
        ));
    }

    Ok(())
}
