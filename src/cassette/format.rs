//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"git"` or `"fs"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port: `null` for git queries, `{"path": ..}`
    /// (plus `"contents"` for writes) for filesystem calls.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    ///
    /// Every `git` method and the fallible `fs` methods store
    /// `{"ok": value}` on success and `{"err": "message"}` on failure, with
    /// the error rendered through `Display`. Unit results are `{"ok": null}`
    /// and so is `exact_tag` when HEAD carries no tag. `fs::exists` stores a
    /// bare boolean. Replay accepts a bare value anywhere as `ok`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// HEAD commit of the recorded repository, or `"unknown"`.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_null_tag_output() {
        let cassette = Cassette {
            name: "detached".into(),
            recorded_at: Utc::now(),
            commit: "abc123".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "git".into(),
                method: "exact_tag".into(),
                input: json!(null),
                output: json!({"ok": null}),
            }],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let back: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(back.interactions[0].output, json!({"ok": null}));
        assert_eq!(cassette, back);
    }
}
