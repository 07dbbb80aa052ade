use crate::config::Config;
use crate::core::calculator::summary::latest_status;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render::print_status;
use crate::utils::date::now_millis;
use chrono::Local;

use super::open_store;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let status = latest_status(store.all(), now_millis());

    header("Latest");
    print_status(&Local, &status);
    Ok(())
}
