use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimelineLogic;
use crate::core::timeline::SortOrder;
use crate::core::window::Window;
use crate::db::initialize::open_db;
use crate::errors::{AppError, AppResult};
use crate::models::timeline::{DaySchedule, TimelineView};
use crate::ui::messages::{header, info};
use crate::utils::colors::{MAGENTA, RESET, color_for_dose};
use crate::utils::date::{format_millis, today};
use chrono::Local;

/// Window from `--period`, falling back to the configured default.
pub(crate) fn resolve_window(period: &Option<String>, cfg: &Config) -> AppResult<Window> {
    let raw = period.as_deref().unwrap_or(&cfg.default_window);
    Window::parse(raw, today())
}

fn resolve_order(desc: bool, asc: bool, cfg: &Config) -> AppResult<SortOrder> {
    if desc {
        return Ok(SortOrder::Desc);
    }
    if asc {
        return Ok(SortOrder::Asc);
    }
    SortOrder::from_str_opt(&cfg.timeline_order).ok_or_else(|| {
        AppError::Config(format!(
            "timeline_order must be 'asc' or 'desc', got '{}'",
            cfg.timeline_order
        ))
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timeline { period, desc, asc } = cmd {
        let window = resolve_window(period, cfg)?;
        let order = resolve_order(*desc, *asc, cfg)?;

        let pool = open_db(&cfg.database)?;
        let view = TimelineLogic::view(&pool, window, &Local, order, today())?;

        print_view(&view, &window, cfg.show_weekday);
    }
    Ok(())
}

fn print_view(view: &TimelineView, window: &Window, show_weekday: bool) {
    header(format!("Schedule: {}", window.describe()));

    if view.is_empty() {
        info("No schedule for this period");
        return;
    }

    for day in &view.days {
        print_day(day, show_weekday);
    }

    println!(
        "\n{} dose(s) over {} day(s).",
        view.event_count(),
        view.days.len()
    );
}

fn print_day(day: &DaySchedule, show_weekday: bool) {
    let weekday = if show_weekday {
        format!(" {}", day.date.format("%a"))
    } else {
        String::new()
    };
    println!(
        "\n{}{} {}{}{}",
        MAGENTA, day.day_number, day.month_short, weekday, RESET
    );

    for e in &day.events {
        let color = color_for_dose(e.dose_number, e.total_doses);
        println!(
            "  {}  {:<28} {}dose {}/{}{}  [#{}]",
            format_millis(e.timestamp, "%H:%M"),
            e.medication.label(),
            color,
            e.dose_number,
            e.total_doses,
            RESET,
            e.log_id
        );
    }
}
