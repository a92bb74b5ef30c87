// src/export/logic.rs

use crate::core::logic::TimelineLogic;
use crate::core::timeline::SortOrder;
use crate::core::window::Window;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::rows_from_days;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use chrono::{NaiveDate, TimeZone};

/// High-level export of timeline events.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the doses inside `window` (oldest first) to `file`.
    /// Returns the number of exported rows.
    pub fn export<Tz: TimeZone>(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        window: Window,
        tz: &Tz,
        today: NaiveDate,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        let view = TimelineLogic::view(pool, window, tz, SortOrder::Asc, today)?;
        let rows = rows_from_days(&view.days);

        if rows.is_empty() {
            warning(format!("No doses found for {}.", window.describe()));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "Exported {} dose(s) as {} ({})",
                rows.len(),
                format.as_str(),
                window.describe()
            ),
        );

        Ok(rows.len())
    }
}
