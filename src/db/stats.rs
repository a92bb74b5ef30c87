use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::format_millis;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub medications: i64,
    pub logs: i64,
    pub first_log: Option<i64>,
    pub last_log: Option<i64>,
    /// Log rows whose medication is gone (only possible if foreign keys
    /// were disabled when the medication was deleted).
    pub orphan_logs: i64,
}

pub fn gather_stats(pool: &DbPool) -> AppResult<DbStats> {
    let conn = &pool.conn;

    let medications: i64 = conn.query_row("SELECT COUNT(*) FROM medications", [], |r| r.get(0))?;
    let (logs, first_log, last_log): (i64, Option<i64>, Option<i64>) = conn.query_row(
        "SELECT COUNT(*), MIN(timestamp), MAX(timestamp) FROM medication_logs",
        [],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
    )?;
    let orphan_logs: i64 = conn.query_row(
        "SELECT COUNT(*) FROM medication_logs l
         LEFT JOIN medications m ON m.id = l.medication_id
         WHERE m.id IS NULL",
        [],
        |r| r.get(0),
    )?;

    Ok(DbStats {
        medications,
        logs,
        first_log,
        last_log,
        orphan_logs,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let stats = gather_stats(pool)?;
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);
    println!(
        "{}• Medications:{} {}{}{}",
        CYAN, RESET, GREEN, stats.medications, RESET
    );
    println!("{}• Dose logs:{} {}{}{}", CYAN, RESET, GREEN, stats.logs, RESET);

    let fmt = |ts: Option<i64>| match ts {
        Some(ms) => format_millis(ms, "%Y-%m-%d %H:%M"),
        None => format!("{GREY}--{RESET}"),
    };
    println!("{}• Dose range:{}", CYAN, RESET);
    println!("    from: {}", fmt(stats.first_log));
    println!("    to:   {}", fmt(stats.last_log));

    if stats.orphan_logs > 0 {
        println!(
            "{}• Orphan logs:{} {}{}{} (hidden from the timeline)",
            CYAN, RESET, YELLOW, stats.orphan_logs, RESET
        );
    }

    println!();
    Ok(())
}
