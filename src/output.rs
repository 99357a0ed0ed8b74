//! Console tables and the files handed to the chart renderer.
//!
//! Each analysis table is written as its own CSV with a header row; the
//! summary goes to `report.json`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::Analysis;
use crate::analyzers::types::{
    AnalysisReport, GenreRating, GenreTopVoted, RuntimePoint, TopMovie, VotePoint,
};
use crate::model::EnrichedRecord;
use crate::pipeline::WorkingSet;

const TITLE_WIDTH: usize = 40;

pub const REPORT_FILE: &str = "report.json";

/// A row type written as one CSV line. `HEADERS` matches the serialized
/// field order so an empty table still gets its header row.
pub trait CsvTable: Serialize {
    const HEADERS: &'static [&'static str];
}

impl CsvTable for GenreRating {
    const HEADERS: &'static [&'static str] = &["genre", "mean_rating", "movies"];
}

impl CsvTable for TopMovie {
    const HEADERS: &'static [&'static str] = &["title", "year", "rating", "votes", "genre"];
}

impl CsvTable for RuntimePoint {
    const HEADERS: &'static [&'static str] = &["runtime_minutes", "rating"];
}

impl CsvTable for GenreTopVoted {
    const HEADERS: &'static [&'static str] = &["genre", "title", "votes", "rating"];
}

impl CsvTable for VotePoint {
    const HEADERS: &'static [&'static str] = &["votes", "rating"];
}

impl CsvTable for EnrichedRecord {
    const HEADERS: &'static [&'static str] = &[
        "tconst",
        "primary_title",
        "original_title",
        "is_adult",
        "start_year",
        "end_year",
        "runtime_minutes",
        "genres",
        "primary_genre",
        "average_rating",
        "num_votes",
    ];
}

/// Prints the cleaned row count followed by the first `sample_rows` rows.
pub fn write_working_set_summary(
    out: &mut impl Write,
    working_set: &WorkingSet,
    sample_rows: usize,
) -> Result<()> {
    writeln!(out, "data: {} rows", working_set.len())?;
    writeln!(
        out,
        "{:<12} {:<w$} {:>6} {:<12} {:>6} {:>9}",
        "tconst",
        "title",
        "year",
        "genre",
        "rating",
        "votes",
        w = TITLE_WIDTH
    )?;
    for r in working_set.sample(sample_rows) {
        writeln!(
            out,
            "{:<12} {:<w$} {:>6} {:<12} {:>6.1} {:>9}",
            r.tconst,
            clip(&r.primary_title),
            r.start_year,
            r.primary_genre,
            r.average_rating,
            r.num_votes,
            w = TITLE_WIDTH
        )?;
    }
    Ok(())
}

pub fn write_top_rated(out: &mut impl Write, since_year: i32, rows: &[TopMovie]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Top {} movies since {since_year}:", rows.len())?;
    writeln!(
        out,
        "{:<w$} {:>6} {:>6} {:>9} {:<12}",
        "title",
        "year",
        "rating",
        "votes",
        "genre",
        w = TITLE_WIDTH
    )?;
    for m in rows {
        writeln!(
            out,
            "{:<w$} {:>6} {:>6.1} {:>9} {:<12}",
            clip(&m.title),
            m.year,
            m.rating,
            m.votes,
            m.genre,
            w = TITLE_WIDTH
        )?;
    }
    Ok(())
}

pub fn write_top_voted(out: &mut impl Write, rows: &[GenreTopVoted]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Top movie by votes in each genre:")?;
    writeln!(
        out,
        "{:<12} {:<w$} {:>9} {:>6}",
        "genre",
        "title",
        "votes",
        "rating",
        w = TITLE_WIDTH
    )?;
    for g in rows {
        writeln!(
            out,
            "{:<12} {:<w$} {:>9} {:>6.1}",
            g.genre,
            clip(&g.title),
            g.votes,
            g.rating,
            w = TITLE_WIDTH
        )?;
    }
    Ok(())
}

/// Writes the selected analysis tables and `report.json` into `dir`,
/// creating it if needed. Existing files are overwritten.
pub fn write_report(dir: &Path, report: &AnalysisReport, only: &[Analysis]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    for analysis in only {
        let path = dir.join(analysis.file_name());
        match analysis {
            Analysis::GenreRating => write_table(&path, &report.genre_rating)?,
            Analysis::TopRated => write_table(&path, &report.top_rated_since)?,
            Analysis::Runtime => write_table(&path, &report.runtime_points)?,
            Analysis::TopVoted => write_table(&path, &report.top_voted_by_genre)?,
            Analysis::Votes => write_table(&path, &report.vote_points)?,
        }
    }

    let path = dir.join(REPORT_FILE);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    info!(dir = %dir.display(), tables = only.len(), "Report written");
    Ok(())
}

/// Writes the working set as CSV with a header row.
pub fn write_working_set(path: &Path, records: &[EnrichedRecord]) -> Result<()> {
    write_table(path, records)?;
    info!(path = %path.display(), rows = records.len(), "Working set written");
    Ok(())
}

/// Serializes `rows` into a fresh CSV file at `path`. The header row is
/// written even when `rows` is empty.
pub fn write_table<T: CsvTable>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    if rows.is_empty() {
        writer.write_record(T::HEADERS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

fn clip(s: &str) -> String {
    if s.chars().count() <= TITLE_WIDTH {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(TITLE_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    }
}
