//! Submission records and id allocation

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique submission id, derived from the creation time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a recorded audio clip (URL, file path, blob key...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioRef(pub String);

impl AudioRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single participant's recorded attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    /// Display name (trimmed)
    pub name: String,
    /// Score in [0, 100]
    pub score: f64,
    /// Completion time in seconds, [1, 3600]
    pub time: f64,
    /// Optional recorded clip
    #[serde(default, alias = "audioUrl", skip_serializing_if = "Option::is_none")]
    pub audio_reference: Option<AudioRef>,
    /// When the submission was accepted
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn has_audio(&self) -> bool {
        self.audio_reference.is_some()
    }
}

/// What the form hands to [`crate::SubmissionStore::submit`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    pub name: String,
    pub score: f64,
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_reference: Option<AudioRef>,
}

impl SubmissionInput {
    pub fn new(name: impl Into<String>, score: f64, time: f64) -> Self {
        Self {
            name: name.into(),
            score,
            time,
            audio_reference: None,
        }
    }

    /// Attach an audio clip handle
    pub fn with_audio(mut self, audio: AudioRef) -> Self {
        self.audio_reference = Some(audio);
        self
    }
}

/// Hands out strictly increasing ids seeded from wall-clock milliseconds.
///
/// Two submissions in the same millisecond, or a clock that stepped
/// backwards, still get distinct ids because every id is at least one past
/// the previous one.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Make sure future ids sort after everything already issued elsewhere
    pub fn observe(&mut self, id: SubmissionId) {
        self.last = self.last.max(id.0);
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> SubmissionId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        SubmissionId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().unwrap()
    }

    #[test]
    fn test_ids_follow_clock() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(at(1_000)), SubmissionId(1_000));
        assert_eq!(ids.next_id(at(2_500)), SubmissionId(2_500));
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id(at(5_000));
        let b = ids.next_id(at(5_000));
        let c = ids.next_id(at(4_000)); // clock stepped back
        assert!(a < b && b < c);
    }

    #[test]
    fn test_observe_skips_loaded_ids() {
        let mut ids = IdGenerator::new();
        ids.observe(SubmissionId(9_000));
        assert_eq!(ids.next_id(at(1_000)), SubmissionId(9_001));
    }

    #[test]
    fn test_legacy_field_names_deserialize() {
        let json = r#"{"id":1700000000000,"name":"An","score":95,"time":30,
            "audioUrl":"blob:abc","audioBlob":{},"timestamp":"2024-01-01T00:00:00.000Z"}"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.id, SubmissionId(1_700_000_000_000));
        assert_eq!(sub.score, 95.0);
        assert_eq!(sub.audio_reference, Some(AudioRef::new("blob:abc")));
        assert_eq!(sub.created_at, at(1_704_067_200_000));
    }

    #[test]
    fn test_absent_audio_not_serialized() {
        let sub = Submission {
            id: SubmissionId(1),
            name: "A".into(),
            score: 50.0,
            time: 10.0,
            audio_reference: None,
            created_at: at(0),
        };
        let json = serde_json::to_string(&sub).unwrap();
        assert!(!json.contains("audioReference"));
        assert!(json.contains("createdAt"));
    }
}
