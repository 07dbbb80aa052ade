use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

use super::{open_cache, open_remote};

pub async fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    let remote = open_remote(cfg)?;

    match cmd {
        Commands::Register {
            email,
            password,
            name,
        } => {
            remote.register(email, password, name.as_deref()).await?;
            success(format!("Account {email} created. Run `babysteps login` next."));
        }
        Commands::Login { email, password } => {
            let session = remote.login(email, password).await?;

            let mut updated = cfg.clone();
            updated.token = Some(session.token);
            if is_test {
                info("Test mode: token not written to the configuration.");
            } else {
                let path = updated.save()?;
                info(format!("Token stored in {}", path.display()));
            }

            open_cache(cfg)?.audit("login", email, "Session token obtained");
            success(format!(
                "Logged in as {}",
                session.user.name.as_deref().unwrap_or(email)
            ));
        }
        _ => {}
    }

    Ok(())
}
