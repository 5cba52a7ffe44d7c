use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use athlete_terminal::profile::ProfileTable;

fn main() -> Result<()> {
    let loaded;
    let table = match parse_path_arg("--profiles") {
        Some(path) => {
            loaded = ProfileTable::load(&path)
                .with_context(|| format!("load profiles from {}", path.display()))?;
            &loaded
        }
        None => ProfileTable::builtin(),
    };
    let tolerance = parse_value_arg("--tolerance")
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(0);
    let strict = std::env::args().skip(1).any(|arg| arg == "--strict");

    println!("Sport profiles: {} pairs", table.len());
    for sport in table.sports() {
        println!(
            "  {}: {}",
            sport.label(),
            table.positions_for(sport.label()).join(", ")
        );
    }

    let issues = table.calorie_discrepancies(tolerance);
    if issues.is_empty() {
        println!("Meal plans: all daily totals match their meals (tolerance {tolerance} kcal)");
        return Ok(());
    }

    println!(
        "Meal plans: {} day(s) off by more than {tolerance} kcal",
        issues.len()
    );
    for issue in &issues {
        println!(
            "  {} {}: declared {} kcal, meals sum to {} ({:+}){}",
            issue.plan,
            issue.day,
            issue.declared,
            issue.summed,
            issue.difference(),
            if issue.unannotated > 0 {
                format!(", {} meal(s) without kcal", issue.unannotated)
            } else {
                String::new()
            }
        );
    }

    if strict {
        bail!("{} calorie discrepancies", issues.len());
    }
    Ok(())
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    parse_value_arg(flag).map(PathBuf::from)
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
