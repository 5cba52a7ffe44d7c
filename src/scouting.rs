use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::roster::RosterAthlete;

pub struct ExportReport {
    pub athletes: usize,
    pub awards: usize,
}

/// Writes the scouting board to an xlsx workbook with an Athletes sheet and
/// an Awards sheet (one row per award).
pub fn export_scouting(path: &Path, athletes: &[&RosterAthlete]) -> Result<ExportReport> {
    let mut athlete_rows = vec![vec![
        "Rank".to_string(),
        "Name".to_string(),
        "Sport".to_string(),
        "Position".to_string(),
        "Age".to_string(),
        "Awards".to_string(),
        "Image".to_string(),
    ]];
    let mut award_rows = vec![vec![
        "Name".to_string(),
        "Sport".to_string(),
        "Award".to_string(),
    ]];

    for (idx, athlete) in athletes.iter().enumerate() {
        athlete_rows.push(vec![
            (idx + 1).to_string(),
            athlete.name.clone(),
            athlete.sport.clone(),
            athlete.position.clone(),
            athlete.age.to_string(),
            athlete.awards.len().to_string(),
            athlete.image_url.clone(),
        ]);
        for award in &athlete.awards {
            award_rows.push(vec![
                athlete.name.clone(),
                athlete.sport.clone(),
                award.clone(),
            ]);
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Athletes")?;
        write_rows(sheet, &athlete_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Awards")?;
        write_rows(sheet, &award_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        athletes: athlete_rows.len().saturating_sub(1),
        awards: award_rows.len().saturating_sub(1),
    })
}

fn write_rows(sheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            sheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
