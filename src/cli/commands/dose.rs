use crate::cli::parser::{Commands, DoseCommands};
use crate::config::Config;
use crate::core::dose::DoseLogic;
use crate::core::medication::MedicationLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::date::format_millis;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Dose(sub) = cmd else {
        return Ok(());
    };

    let pool = open_db(&cfg.database)?;

    match sub {
        DoseCommands::List { medication_id } => {
            let med = MedicationLogic::get(&pool, *medication_id)?;
            let logs = DoseLogic::history(&pool, *medication_id)?;

            header(med.label());
            if logs.is_empty() {
                info("No doses logged yet.");
                return Ok(());
            }

            let mut table = Table::new(vec!["Log", "Taken at"]);
            for l in logs {
                table.add_row(vec![
                    l.id.to_string(),
                    format_millis(l.timestamp, "%Y-%m-%d %H:%M"),
                ]);
            }
            print!("{}", table.render());
        }

        DoseCommands::Del { log_id } => {
            if DoseLogic::delete(&pool, *log_id)? {
                success(format!("Dose log #{} deleted.", log_id));
            } else {
                info(format!("No dose log #{}; nothing to delete.", log_id));
            }
        }
    }

    Ok(())
}
