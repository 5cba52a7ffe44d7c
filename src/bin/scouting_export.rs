use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use athlete_terminal::persist::app_cache_dir;
use athlete_terminal::roster::Roster;
use athlete_terminal::scouting::export_scouting;

fn main() -> Result<()> {
    let out = parse_value_arg("--out")
        .map(PathBuf::from)
        .or_else(|| app_cache_dir().map(|dir| dir.join("scouting.xlsx")))
        .context("unable to resolve output path")?;
    let sport = parse_value_arg("--sport");

    let loaded;
    let roster = match parse_value_arg("--roster") {
        Some(path) => {
            loaded = Roster::load(&PathBuf::from(path))?;
            &loaded
        }
        None => Roster::builtin(),
    };
    let athletes = roster.ranked(sport.as_deref());
    if athletes.is_empty() {
        bail!(
            "no athletes for sport {}",
            sport.as_deref().unwrap_or("(any)")
        );
    }

    if let Some(dir) = out.parent() {
        std::fs::create_dir_all(dir).ok();
    }
    let report = export_scouting(&out, &athletes)?;

    println!("Scouting export complete");
    println!("File: {}", out.display());
    println!("Athletes: {}", report.athletes);
    println!("Awards: {}", report.awards);
    for (rank, athlete) in athletes.iter().take(5).enumerate() {
        println!(
            "  {}. {} ({}, {}) awards={}",
            rank + 1,
            athlete.name,
            athlete.sport,
            athlete.position,
            athlete.awards.len()
        );
    }
    Ok(())
}

fn parse_value_arg(flag: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
