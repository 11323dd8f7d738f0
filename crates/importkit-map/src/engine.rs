//! Scoring engine behind the mapping suggestions.

use std::cmp::Ordering;

use regex::Regex;
use tracing::{debug, warn};

use importkit_model::{FieldDefinition, FieldRules, FieldType, MappingSuggestion};

use crate::shape;
use crate::synonyms;
use crate::utils::normalize_text;

const EXACT_MATCH_SCORE: f32 = 100.0;
const NAME_PARTIAL_SCORE: f32 = 80.0;
const LABEL_PARTIAL_SCORE: f32 = 85.0;
const SYNONYM_EXACT_SCORE: f32 = 90.0;
const SYNONYM_REVERSE_SCORE: f32 = 75.0;
const SYNONYM_OVERLAP_SCORE: f32 = 70.0;
const DATA_TYPE_MAX_SCORE: f32 = 60.0;
/// Weight of the data-type score in the combined confidence.
const DATA_TYPE_WEIGHT: f32 = 0.3;
const MAX_CONFIDENCE: f32 = 100.0;
/// Suggestions at or below this confidence are dropped.
const SUGGESTION_THRESHOLD: f32 = 30.0;
/// Synonyms shorter than this take part in exact comparison only.
const MIN_OVERLAP_SYNONYM_LEN: usize = 3;

const STRONG_PARTIAL_REASON_MIN: f32 = 80.0;
const SEMANTIC_REASON_MIN: f32 = 70.0;
const PARTIAL_REASON_MIN: f32 = 50.0;
const DATA_REASON_MIN: f32 = 30.0;

/// Number of data rows sampled per header when scoring type evidence.
pub const MAPPING_SAMPLE_ROWS: usize = 3;

/// Scores every header against the field definitions and returns the
/// suggestions that clear the confidence threshold, strongest first.
#[must_use]
pub fn suggest_mappings(
    headers: &[String],
    sample_rows: &[Vec<String>],
    fields: &[FieldDefinition],
) -> Vec<MappingSuggestion> {
    MappingEngine::new(fields).suggest(headers, sample_rows)
}

/// Header-to-field scorer with the field side prepared up front.
///
/// Preparing the engine normalizes every field name and label once and
/// compiles custom regex patterns once, so scoring a wide file stays cheap.
pub struct MappingEngine<'a> {
    candidates: Vec<FieldCandidate<'a>>,
}

struct FieldCandidate<'a> {
    field: &'a FieldDefinition,
    name_norm: String,
    label_norm: Option<String>,
    pattern: Option<Regex>,
}

impl<'a> MappingEngine<'a> {
    #[must_use]
    pub fn new(fields: &'a [FieldDefinition]) -> Self {
        let candidates = fields
            .iter()
            .map(|field| {
                let pattern = match &field.rules {
                    FieldRules::CustomRegex { pattern } if !pattern.is_empty() => {
                        match Regex::new(pattern) {
                            Ok(regex) => Some(regex),
                            Err(error) => {
                                warn!(
                                    field = %field.name,
                                    pattern,
                                    %error,
                                    "invalid custom regex, no data evidence"
                                );
                                None
                            }
                        }
                    }
                    _ => None,
                };
                FieldCandidate {
                    field,
                    name_norm: normalize_text(&field.name),
                    label_norm: field
                        .display_label
                        .as_deref()
                        .map(normalize_text)
                        .filter(|label| !label.is_empty()),
                    pattern,
                }
            })
            .collect();
        Self { candidates }
    }

    /// One suggestion per header at most; output sorted by descending
    /// confidence, ties keeping header order. Empty headers, empty fields
    /// or zero sample rows yield an empty list.
    #[must_use]
    pub fn suggest(
        &self,
        headers: &[String],
        sample_rows: &[Vec<String>],
    ) -> Vec<MappingSuggestion> {
        let mut suggestions = Vec::new();
        if headers.is_empty() || sample_rows.is_empty() || self.candidates.is_empty() {
            return suggestions;
        }
        let sampled = &sample_rows[..sample_rows.len().min(MAPPING_SAMPLE_ROWS)];
        for (column, header) in headers.iter().enumerate() {
            let header_norm = normalize_text(header);
            if header_norm.is_empty() {
                continue;
            }
            let samples: Vec<&str> = sampled
                .iter()
                .map(|row| row.get(column).map(String::as_str).unwrap_or(""))
                .collect();
            let Some((candidate, breakdown)) = self.best_candidate(&header_norm, &samples) else {
                continue;
            };
            let confidence = breakdown.combined();
            if confidence <= SUGGESTION_THRESHOLD {
                continue;
            }
            debug!(
                header = %header,
                field = %candidate.field.name,
                confidence,
                "suggesting mapping"
            );
            suggestions.push(MappingSuggestion {
                csv_column: header.clone(),
                target_field_name: candidate.field.name.clone(),
                confidence,
                reason: breakdown.reason(candidate.field.field_type()),
            });
        }
        suggestions
            .sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));
        suggestions
    }

    /// Highest-scoring field for one header. Ties resolve to the field that
    /// comes first in schema order.
    fn best_candidate(
        &self,
        header_norm: &str,
        samples: &[&str],
    ) -> Option<(&FieldCandidate<'a>, ScoreBreakdown)> {
        let mut best: Option<(&FieldCandidate<'a>, ScoreBreakdown)> = None;
        for candidate in &self.candidates {
            let breakdown = score_candidate(header_norm, samples, candidate);
            let better = match &best {
                Some((_, current)) => breakdown.combined() > current.combined(),
                None => true,
            };
            if better {
                best = Some((candidate, breakdown));
            }
        }
        best
    }
}

/// Component scores for one header-field pair, all on a 0-100 scale except
/// `data` (0-60) and `ratio` (0-1).
#[derive(Debug, Clone, Copy)]
struct ScoreBreakdown {
    exact: f32,
    partial: f32,
    semantic: f32,
    data: f32,
    ratio: f32,
}

impl ScoreBreakdown {
    fn combined(&self) -> f32 {
        let name = self.exact.max(self.partial).max(self.semantic);
        (name + DATA_TYPE_WEIGHT * self.data).min(MAX_CONFIDENCE)
    }

    fn reason(&self, field_type: FieldType) -> String {
        let label = if self.exact >= EXACT_MATCH_SCORE {
            "Exact name match"
        } else if self.partial >= STRONG_PARTIAL_REASON_MIN {
            "Strong partial name match"
        } else if self.semantic >= SEMANTIC_REASON_MIN {
            "Semantic name match"
        } else if self.partial >= PARTIAL_REASON_MIN {
            "Partial name match"
        } else if self.data >= DATA_REASON_MIN {
            "Data type match"
        } else {
            "Low confidence match"
        };
        if self.data >= DATA_REASON_MIN {
            let pct = (self.ratio * 100.0).round();
            format!("{label} ({pct}% of samples match {field_type})")
        } else {
            label.to_string()
        }
    }
}

fn score_candidate(
    header_norm: &str,
    samples: &[&str],
    candidate: &FieldCandidate,
) -> ScoreBreakdown {
    let (data, ratio) = data_type_score(samples, candidate);
    ScoreBreakdown {
        exact: exact_score(header_norm, candidate),
        partial: partial_score(header_norm, candidate),
        semantic: semantic_score(header_norm, &candidate.name_norm),
        data,
        ratio,
    }
}

fn exact_score(header_norm: &str, candidate: &FieldCandidate) -> f32 {
    if header_norm == candidate.name_norm || candidate.label_norm.as_deref() == Some(header_norm) {
        EXACT_MATCH_SCORE
    } else {
        0.0
    }
}

fn partial_score(header_norm: &str, candidate: &FieldCandidate) -> f32 {
    let mut score = 0.0f32;
    if contains_either(header_norm, &candidate.name_norm) {
        score = NAME_PARTIAL_SCORE;
    }
    if let Some(label) = candidate.label_norm.as_deref()
        && contains_either(header_norm, label)
    {
        score = score.max(LABEL_PARTIAL_SCORE);
    }
    score
}

fn contains_either(header: &str, name: &str) -> bool {
    if header.is_empty() || name.is_empty() {
        return false;
    }
    header.contains(name) || name.contains(header)
}

/// Best synonym-dictionary hit for the pair.
///
/// Forward lookups treat the field name as a concept key; the reverse
/// direction fires when header and field name are both synonyms of the same
/// concept without the field being the key.
fn semantic_score(header_norm: &str, name_norm: &str) -> f32 {
    let mut best = 0.0f32;
    if let Some(concept) = synonyms::concept_for_field(name_norm) {
        if concept.contains(header_norm) {
            best = SYNONYM_EXACT_SCORE;
        } else if concept
            .synonyms
            .iter()
            .any(|synonym| synonym_overlap(header_norm, synonym))
        {
            best = SYNONYM_OVERLAP_SCORE;
        }
    }
    for concept in synonyms::CONCEPTS {
        if concept.key != name_norm && concept.contains(name_norm) && concept.contains(header_norm)
        {
            best = best.max(SYNONYM_REVERSE_SCORE);
        }
    }
    best
}

fn synonym_overlap(header: &str, synonym: &str) -> bool {
    synonym.len() >= MIN_OVERLAP_SYNONYM_LEN
        && (header.contains(synonym) || synonym.contains(header))
}

fn data_type_score(samples: &[&str], candidate: &FieldCandidate) -> (f32, f32) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let matching = samples.iter().filter(|value| sample_matches(value, candidate)).count();
    let ratio = matching as f32 / samples.len() as f32;
    (ratio * DATA_TYPE_MAX_SCORE, ratio)
}

fn sample_matches(value: &str, candidate: &FieldCandidate) -> bool {
    // Custom patterns were compiled when the engine was built; a pattern
    // that failed to compile gives no data evidence.
    if let FieldRules::CustomRegex { .. } = &candidate.field.rules {
        let trimmed = value.trim();
        return !trimmed.is_empty()
            && candidate.pattern.as_ref().is_some_and(|regex| regex.is_match(trimmed));
    }
    shape::value_matches_type(value, &candidate.field.rules)
}
