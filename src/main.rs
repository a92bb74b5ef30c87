//! medtracker main entrypoint.

use medtracker::run;
use medtracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
