use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::age::age_at;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{Gender, Profile};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::date::{now_millis, parse_loose_date};
use chrono::Local;

use super::{open_cache, open_client};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile {
        name,
        birth,
        gender,
        avatar,
    } = cmd
    else {
        return Ok(());
    };

    let client = open_client(cfg)?;
    let current = client.profile();

    if name.is_none() && birth.is_none() && gender.is_none() && avatar.is_none() {
        match current {
            Some(p) => print_profile(&p),
            None => warning("No profile yet. Set one with --name --birth --gender."),
        }
        return Ok(());
    }

    let birth_date = birth
        .as_deref()
        .map(|b| parse_loose_date(b).ok_or_else(|| AppError::InvalidDate(b.to_string())))
        .transpose()?;
    let gender = gender
        .as_deref()
        .map(|g| Gender::from_code(g).ok_or_else(|| AppError::Validation(format!("unknown gender '{g}'"))))
        .transpose()?;

    let mut profile = match current {
        Some(p) => p,
        None => {
            let (Some(b), Some(g)) = (birth_date, gender) else {
                return Err(AppError::Validation(
                    "a new profile needs --name, --birth and --gender".into(),
                ));
            };
            Profile::new(name.clone().unwrap_or_default(), b, g)
        }
    };
    if let Some(n) = name {
        profile.name = n.clone();
    }
    if let Some(b) = birth_date {
        profile.birth_date = b;
    }
    if let Some(g) = gender {
        profile.gender = g;
    }
    if let Some(a) = avatar {
        profile.avatar = Some(a.clone()).filter(|a| !a.trim().is_empty());
    }

    let saved = client.save_profile(profile).await?;
    open_cache(cfg)?.audit("profile", &saved.name, "Profile saved");
    success(format!("Profile saved for {}", saved.name));
    print_profile(&saved);
    Ok(())
}

fn print_profile(p: &Profile) {
    let age = age_at(&Local, p.birth_date, now_millis());

    header(&p.name);
    info(format!("Born   : {}", p.birth_date.format("%Y-%m-%d")));
    info(format!("Gender : {}", p.gender.as_str()));
    info(format!("Age    : {}", age.describe()));
}
