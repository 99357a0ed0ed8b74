//! Reader for the two headerless input files.
//!
//! Fields are handed over as raw strings; sentinel and numeric handling
//! happens in [`crate::pipeline`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ErrorKind, ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use tracing::{debug, info, warn};

use crate::model::{RatingRecord, TitleRecord};

/// Parsing options shared by both input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub quoting: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            quoting: true,
        }
    }
}

/// Loads the title basics file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or an I/O error occurs while reading it.
#[tracing::instrument(skip(path, options), fields(path = %path.display()))]
pub fn load_titles(path: &Path, options: &LoadOptions) -> Result<Vec<TitleRecord>> {
    let rows = read_rows(path, options, TitleRecord::COLUMNS.len(), |rec| {
        TitleRecord::from_fields(rec.iter())
    })?;
    info!(rows = rows.len(), "Title basics loaded");
    Ok(rows)
}

/// Loads the ratings file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or an I/O error occurs while reading it.
#[tracing::instrument(skip(path, options), fields(path = %path.display()))]
pub fn load_ratings(path: &Path, options: &LoadOptions) -> Result<Vec<RatingRecord>> {
    let rows = read_rows(path, options, RatingRecord::COLUMNS.len(), |rec| {
        RatingRecord::from_fields(rec.iter())
    })?;
    info!(rows = rows.len(), "Ratings loaded");
    Ok(rows)
}

/// Opens `path`, gunzipping on the fly when the name ends in `.gz`.
fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    let gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if gzipped {
        debug!("Reading gzip-compressed input");
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Reads every row of a headerless file, dropping rows wider than `width`
/// or not valid UTF-8.
fn read_rows<T>(
    path: &Path,
    options: &LoadOptions,
    width: usize,
    build: impl Fn(&StringRecord) -> T,
) -> Result<Vec<T>> {
    let input = open_input(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .quoting(options.quoting)
        .from_reader(input);

    let mut rows = Vec::new();
    let mut malformed = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) if record.len() <= width => rows.push(build(&record)),
            Ok(_) => malformed += 1,
            Err(e) if matches!(e.kind(), ErrorKind::Utf8 { .. }) => malformed += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        }
    }

    if malformed > 0 {
        warn!(malformed, "Dropped malformed rows");
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = temp_path("movie_stats_does_not_exist.csv");
        let _ = fs::remove_file(&path);

        let err = load_titles(&path, &LoadOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("movie_stats_does_not_exist.csv"));
    }

    #[test]
    fn test_load_titles_headerless() {
        let path = temp_path("movie_stats_loader_titles.csv");
        fs::write(
            &path,
            "tt1,movie,\"Heat, the Film\",Heat,0,1995,\\N,170,\"Action,Crime\"\n\
             tt2,short,Clip,Clip,0,2001,\\N,5,Comedy\n",
        )
        .unwrap();

        let titles = load_titles(&path, &LoadOptions::default()).unwrap();

        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].primary_title, "Heat, the Film");
        assert_eq!(titles[0].genres, "Action,Crime");
        assert_eq!(titles[0].end_year, "\\N");
        assert_eq!(titles[1].title_type, "short");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_wide_rows_are_dropped() {
        let path = temp_path("movie_stats_loader_wide.csv");
        fs::write(&path, "tt1,7.5,200\ntt2,6.0,300,extra\ntt3,5.5\n").unwrap();

        let ratings = load_ratings(&path, &LoadOptions::default()).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].tconst, "tt1");
        assert_eq!(ratings[1].tconst, "tt3");
        assert_eq!(ratings[1].num_votes, "");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_utf8_rows_are_dropped() {
        let path = temp_path("movie_stats_loader_non_utf8.csv");
        fs::write(&path, b"tt1,7.5,200\ntt2,\xff\xfe,300\ntt3,6.0,400\n").unwrap();

        let ratings = load_ratings(&path, &LoadOptions::default()).unwrap();

        let ids: Vec<_> = ratings.iter().map(|r| r.tconst.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);
        assert_eq!(ratings[1].num_votes, "400");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_tab_delimited_without_quoting() {
        let path = temp_path("movie_stats_loader_tabs.tsv");
        fs::write(&path, "tt1\t8.1\t1500\ntt2\t\"7.0\t99\n").unwrap();

        let options = LoadOptions {
            delimiter: b'\t',
            quoting: false,
        };
        let ratings = load_ratings(&path, &options).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].average_rating, "\"7.0");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_gzip_input() {
        let path = temp_path("movie_stats_loader_ratings.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"tt1,7.5,200\ntt2,6.0,300\n").unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let ratings = load_ratings(&path, &LoadOptions::default()).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].num_votes, "300");

        fs::remove_file(&path).unwrap();
    }
}
