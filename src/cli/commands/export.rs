use crate::cli::commands::timeline::resolve_window;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::window::Window;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::today;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = cmd
    {
        // Unlike `timeline`, no period means the whole archive.
        let window = match period {
            Some(_) => resolve_window(period, cfg)?,
            None => Window::All,
        };

        let pool = open_db(&cfg.database)?;
        ExportLogic::export(&pool, *format, file, window, &Local, today(), *force)?;
    }

    Ok(())
}
