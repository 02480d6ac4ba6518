use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::extract;
use crate::manifest::ManifestRow;
use crate::model::ChatService;
use crate::scorer::{self, DifficultyPrediction};

/// Result of a batch rating run.
pub struct RateResult {
    pub total: usize,
    pub scored: usize,
    pub failed: usize,
    pub predictions_path: PathBuf,
    pub messages_path: PathBuf,
}

/// Rate every manifest row, strictly in order, one request pair at a time.
///
/// An unreadable annotation file aborts the run. A scoring failure is
/// logged and recorded as an absent prediction for that row; the run
/// continues. Per-row outcomes stay in one aligned sequence, so the two
/// persisted arrays always have one entry per manifest row (null where
/// scoring failed).
pub fn rate_manifest(
    service: &dyn ChatService,
    rows: &[ManifestRow],
    model: &str,
    output_dir: &Path,
) -> Result<RateResult> {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M").to_string();

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pieces ({eta}) {msg}"
        )
        .unwrap()
        .progress_chars("#>-"),
    );

    let mut outcomes: Vec<Option<DifficultyPrediction>> = Vec::with_capacity(rows.len());
    let mut scored = 0usize;
    let mut failed = 0usize;

    for row in rows {
        let path = &row.chord_locations;
        pb.set_message(path.display().to_string());

        // Unreadable annotation files abort the whole run
        let chords = extract::extract_progression(path)?;
        log::debug!("{}: {} chords", path.display(), chords.lines().count());

        match scorer::predict_difficulty(service, &chords) {
            Ok(prediction) => {
                scored += 1;
                outcomes.push(Some(prediction));
            }
            Err(e) => {
                log::warn!("Scoring failed for {}: {e}", path.display());
                failed += 1;
                outcomes.push(None);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!("done: {scored} scored, {failed} failed"));

    let predictions_path =
        output_dir.join(format!("difficulty_predictions_{model}_{timestamp}.json"));
    let messages_path =
        output_dir.join(format!("difficulty_predictions_{model}_{timestamp}_messages.json"));

    let scores: Vec<Option<&str>> = outcomes
        .iter()
        .map(|o| o.as_ref().map(|p| p.scores_json.as_str()))
        .collect();
    let analyses: Vec<Option<&str>> = outcomes
        .iter()
        .map(|o| o.as_ref().map(|p| p.analysis.as_str()))
        .collect();

    write_json(&predictions_path, &scores)?;
    write_json(&messages_path, &analyses)?;

    Ok(RateResult {
        total: rows.len(),
        scored,
        failed,
        predictions_path,
        messages_path,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChatMessage, ResponseFormat, ServiceError};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct StubService {
        replies: RefCell<VecDeque<Result<ChatMessage, ServiceError>>>,
    }

    impl StubService {
        fn new(replies: Vec<Result<ChatMessage, ServiceError>>) -> Self {
            Self { replies: RefCell::new(replies.into()) }
        }
    }

    impl ChatService for StubService {
        fn complete(
            &self,
            _messages: &[ChatMessage],
            _format: ResponseFormat,
        ) -> Result<ChatMessage, ServiceError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ServiceError::EmptyResponse))
        }
    }

    fn assistant(content: &str) -> ChatMessage {
        ChatMessage { role: "assistant".to_string(), content: content.to_string() }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("fretscore-runner-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_batch_with_one_service_failure() {
        let dir = scratch_dir("partial");

        let first = dir.join("first.tsv");
        std::fs::write(&first, "0.0\tAm\n1.0\tG\n2.0\tF\n").unwrap();
        let second = dir.join("second.tsv");
        std::fs::write(&second, "# only a comment\tx\n").unwrap();

        let rows = vec![
            ManifestRow { chord_locations: first },
            ManifestRow { chord_locations: second },
        ];

        // Row 1 succeeds over two turns; row 2 fails on turn 1
        let stub = StubService::new(vec![
            Ok(assistant("analysis of Am G F")),
            Ok(assistant(r#"{"cfp":1,"cfd":1,"uc":0,"rhc":0,"cpt":1,"bd":0,"r":2}"#)),
            Err(ServiceError::EmptyResponse),
        ]);

        let result = rate_manifest(&stub, &rows, "stub-model", &dir).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.scored, 1);
        assert_eq!(result.failed, 1);

        // Both artifacts stay aligned with the manifest: one entry per row
        let scores: Vec<Option<String>> = serde_json::from_str(
            &std::fs::read_to_string(&result.predictions_path).unwrap(),
        )
        .unwrap();
        assert_eq!(scores.len(), 2);
        assert!(scores[0].as_deref().unwrap().contains("\"cfp\""));
        assert!(scores[1].is_none());

        let analyses: Vec<Option<String>> = serde_json::from_str(
            &std::fs::read_to_string(&result.messages_path).unwrap(),
        )
        .unwrap();
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].as_deref(), Some("analysis of Am G F"));
        assert!(analyses[1].is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_annotation_file_aborts() {
        let dir = scratch_dir("abort");
        let rows = vec![ManifestRow { chord_locations: dir.join("missing.tsv") }];
        let stub = StubService::new(vec![]);

        assert!(rate_manifest(&stub, &rows, "stub-model", &dir).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_artifact_names_carry_model_and_suffix() {
        let dir = scratch_dir("names");
        let stub = StubService::new(vec![]);

        let result = rate_manifest(&stub, &[], "gpt-test", &dir).unwrap();
        let name = result.predictions_path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("difficulty_predictions_gpt-test_"));
        assert!(name.ends_with(".json"));

        let messages_name = result.messages_path.file_name().unwrap().to_string_lossy();
        assert!(messages_name.ends_with("_messages.json"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
