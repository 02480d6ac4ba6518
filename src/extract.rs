use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot read annotation file {path}: {message}")]
    FileAccess { path: String, message: String },
}

/// Heuristic for whether a candidate token names a chord.
///
/// Tab annotations mix chord names (`Am`, `G`, `C|maj7`) with lyric
/// fragments and fingering digits. A token qualifies if it is not a single
/// character and carries a pipe or at least one uppercase letter.
pub fn is_chord_token(token: &str) -> bool {
    token.chars().count() != 1
        && (token.contains('|') || token.chars().any(|c| c.is_uppercase()))
}

/// Parse tab-annotation text into a newline-joined chord progression.
///
/// Rows are tab-delimited. Rows whose first field starts with `#` and rows
/// with fewer than two fields are skipped. The second field is split on
/// commas; the first qualifying candidate (per [`is_chord_token`]) becomes
/// that row's chord. Rows with no qualifying candidate contribute nothing.
/// A file with no qualifying rows yields the empty string.
pub fn parse_annotation(text: &str) -> String {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut chords: Vec<String> = Vec::new();

    for record in rdr.records() {
        // Malformed rows are skipped, never surfaced
        let Ok(record) = record else { continue };

        let Some(first) = record.get(0) else { continue };
        if first.starts_with('#') {
            continue;
        }
        let Some(second) = record.get(1) else { continue };

        if let Some(chord) = second.split(',').find(|t| is_chord_token(t)) {
            chords.push(chord.to_string());
        }
    }

    chords.join("\n")
}

/// Read an annotation file and extract its chord progression.
///
/// The only failure mode is an unreadable file; content is never validated.
pub fn extract_progression(path: &Path) -> Result<String, ExtractError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ExtractError::FileAccess {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(parse_annotation(&contents))
}
