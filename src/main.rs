//! babysteps main entrypoint.

use babysteps::run;
use babysteps::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
