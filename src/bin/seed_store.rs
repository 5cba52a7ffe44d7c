use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use athlete_terminal::contracts::{ContractOffer, ContractTerms, sample_offers, save_offer};
use athlete_terminal::meals::{add_meal, list_meals, preset_meal};
use athlete_terminal::persist::app_cache_dir;
use athlete_terminal::store::SqliteStore;
use athlete_terminal::user_profile::{
    AthleteProfile, RecruiterProfile, UserProfile, fetch_profile, save_profile,
};

const ATHLETE_ID: &str = "demo-athlete";
const RECRUITER_ID: &str = "demo-recruiter";
const MEALS_PER_DAY: usize = 4;

fn main() -> Result<()> {
    let db_path = parse_db_path_arg()
        .or_else(|| app_cache_dir().map(|dir| dir.join("documents.sqlite")))
        .context("unable to resolve sqlite path")?;
    let mut store = SqliteStore::open(&db_path)?;

    save_profile(&mut store, ATHLETE_ID, &demo_athlete())?;
    save_profile(&mut store, RECRUITER_ID, &demo_recruiter())?;

    let today = Utc::now().date_naive();
    let existing = list_meals(&store, ATHLETE_ID, today)?.len();
    for idx in existing..MEALS_PER_DAY {
        add_meal(&mut store, preset_meal(idx, ATHLETE_ID, today))?;
    }

    let mut offers = sample_offers(RECRUITER_ID);
    offers.push(ContractOffer::new(
        ATHLETE_ID,
        RECRUITER_ID,
        ContractTerms {
            salary: 75_000,
            duration_years: 2,
            signing_bonus: 5_000,
            incentives: vec!["Appearance bonus".to_string()],
        },
    )?);
    for offer in &offers {
        save_offer(&mut store, offer)?;
    }

    let athlete = fetch_profile(&store, ATHLETE_ID)?;
    println!("Store seeded");
    println!("DB: {}", db_path.display());
    println!("Athlete: {} ({ATHLETE_ID})", athlete.display_name());
    println!("Recruiter: {RECRUITER_ID}");
    println!(
        "Meals on {}: {}",
        today,
        list_meals(&store, ATHLETE_ID, today)?.len()
    );
    println!("Offers written: {}", offers.len());
    Ok(())
}

fn demo_athlete() -> UserProfile {
    UserProfile::Athlete(AthleteProfile {
        display_name: "Mateo Alvarez".to_string(),
        sport: "Football".to_string(),
        position: "Forward".to_string(),
        age: Some(19),
        height_cm: Some(181),
        weight_kg: Some(76.5),
        school: Some("Riverside Academy".to_string()),
        graduation_year: Some(2026),
        gpa: Some(3.4),
        highlights_url: Some("https://example.com/highlights/mateo".to_string()),
        awards: vec![
            "U19 League Top Scorer".to_string(),
            "Regional Player of the Year".to_string(),
        ],
    })
}

fn demo_recruiter() -> UserProfile {
    UserProfile::Recruiter(RecruiterProfile {
        display_name: "Dana Whitfield".to_string(),
        organization: "Northbridge FC".to_string(),
        title: Some("Head of Recruitment".to_string()),
        sports: vec!["Football".to_string()],
        regions: vec!["Europe".to_string(), "South America".to_string()],
        verified: true,
    })
}

fn parse_db_path_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--db=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--db" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
