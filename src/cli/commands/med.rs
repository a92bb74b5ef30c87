use crate::cli::parser::{Commands, MedCommands};
use crate::config::Config;
use crate::core::medication::{MedicationLogic, MedicationPatch};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Med(sub) = cmd else {
        return Ok(());
    };

    let pool = open_db(&cfg.database)?;

    match sub {
        MedCommands::Add {
            name,
            dosage,
            frequency,
        } => {
            let id = MedicationLogic::add(&pool, name, dosage, frequency)?;
            success(format!("Medication #{} '{}' added.", id, name.trim()));
        }

        MedCommands::List => {
            let meds = MedicationLogic::list(&pool)?;
            if meds.is_empty() {
                info("No medications yet. Add one with `medtracker med add <NAME>`.");
                return Ok(());
            }

            let mut table = Table::new(vec!["ID", "Name", "Dosage", "Frequency", "Doses"]);
            for m in meds {
                let doses = MedicationLogic::dose_count(&pool, m.id)?;
                table.add_row(vec![
                    m.id.to_string(),
                    m.name,
                    or_dash(&m.dosage),
                    or_dash(&m.frequency),
                    doses.to_string(),
                ]);
            }
            print!("{}", colorize_optional_cells(&table.render()));
        }

        MedCommands::Edit {
            id,
            name,
            dosage,
            frequency,
        } => {
            let patch = MedicationPatch {
                name: name.clone(),
                dosage: dosage.clone(),
                frequency: frequency.clone(),
            };
            let med = MedicationLogic::edit(&pool, *id, patch)?;
            success(format!("Medication #{} updated: {}", med.id, med.label()));
        }

        MedCommands::Del { id, yes } => {
            let med = MedicationLogic::get(&pool, *id)?;
            let doses = MedicationLogic::dose_count(&pool, *id)?;

            let prompt = format!(
                "Delete medication #{} '{}' and its {} dose log(s)? This action is irreversible.",
                med.id, med.name, doses
            );
            if !*yes && !confirm(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let (med, removed) = MedicationLogic::delete(&pool, *id)?;
            success(format!(
                "Medication #{} '{}' deleted ({} dose log(s) removed).",
                med.id, med.name, removed
            ));
        }
    }

    Ok(())
}

fn or_dash(s: &str) -> String {
    if s.is_empty() { "--".into() } else { s.to_string() }
}

/// Grey out the "--" placeholders of a rendered table.
fn colorize_optional_cells(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| {
            line.split(" | ")
                .map(|cell| {
                    if cell.trim() == "--" {
                        colorize_optional(cell)
                    } else {
                        cell.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}
