pub mod rubric;

use serde::{Deserialize, Serialize};

use crate::model::{ChatMessage, ChatService, ResponseFormat, ServiceError};

/// Outcome of one two-turn scoring exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPrediction {
    /// JSON object text with the seven criterion scores.
    /// Kept opaque — the service's JSON is not schema-validated.
    pub scores_json: String,
    /// Free-text rubric analysis the scores were extracted from.
    pub analysis: String,
}

/// Rate a chord progression with the two-turn protocol.
///
/// Turn 1 asks for a step-by-step rubric analysis of the progression
/// (free-form text). Turn 2 feeds that analysis back, behind a system
/// instruction, and asks for the scores as a JSON object. A service error
/// in turn 1 propagates immediately; turn 2 is never attempted. An empty
/// progression is a valid input and is submitted as-is.
pub fn predict_difficulty(
    service: &dyn ChatService,
    chords: &str,
) -> Result<DifficultyPrediction, ServiceError> {
    let analysis_messages = [ChatMessage::user(rubric::analysis_prompt(chords))];
    let analysis = service.complete(&analysis_messages, ResponseFormat::Text)?;

    // The assistant's turn-1 message goes into turn 2 verbatim
    let summary_messages = [ChatMessage::system(rubric::SUMMARY_SYSTEM), analysis.clone()];
    let scores = service.complete(&summary_messages, ResponseFormat::JsonObject)?;

    Ok(DifficultyPrediction {
        scores_json: scores.content,
        analysis: analysis.content,
    })
}
