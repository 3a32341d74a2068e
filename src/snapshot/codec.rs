use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::stack::PushMode;
use crate::transition::TransitionSpec;

/// Complete serializable image of a stack manager: the active tab plus every
/// tab's ordered entries. Produced by `StackManager::save`, consumed by
/// `StackManager::restore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub active_tab_id: String,
    pub tabs: Vec<TabSnapshot>,
    /// Content digest stamped by [`Snapshot::seal`]. Absent on snapshots
    /// assembled by hand.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub checksum: Option<String>,
}

/// One tab's recorded stack, bottom entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub id: String,
    pub entries: Vec<EntrySnapshot>,
}

/// One recorded stack entry: everything needed to rebuild a runnable screen
/// and its place on the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySnapshot {
    pub screen_type: String,
    pub screen_args: Value,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub screen_state: Option<Value>,
    pub push_mode: PushMode,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transition: Option<TransitionSpec>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub view_state: Option<Value>,
}

impl Snapshot {
    pub fn new(active_tab_id: impl Into<String>, tabs: Vec<TabSnapshot>) -> Self {
        Self {
            active_tab_id: active_tab_id.into(),
            tabs,
            checksum: None,
        }
    }

    /// Stamp the content digest. Call after the snapshot is fully assembled.
    pub fn seal(mut self) -> Self {
        self.checksum = Some(self.digest());
        self
    }

    /// True when the checksum matches the content, or when no checksum was
    /// ever stamped.
    pub fn verify(&self) -> bool {
        match &self.checksum {
            Some(checksum) => *checksum == self.digest(),
            None => true,
        }
    }

    fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.active_tab_id.as_bytes());
        // Tab snapshots serialize deterministically: struct fields in
        // declaration order, JSON object keys sorted.
        if let Ok(bytes) = serde_json::to_vec(&self.tabs) {
            hasher.update(&bytes);
        }
        hasher.finalize().to_hex().to_string()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn write_to(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_from(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Snapshot {
        Snapshot::new(
            "home",
            vec![
                TabSnapshot {
                    id: "home".to_string(),
                    entries: vec![
                        EntrySnapshot {
                            screen_type: "feed".to_string(),
                            screen_args: json!({ "page": 1 }),
                            screen_state: Some(json!({ "scroll": 42 })),
                            push_mode: PushMode::Replace,
                            transition: None,
                            view_state: None,
                        },
                        EntrySnapshot {
                            screen_type: "detail".to_string(),
                            screen_args: json!({ "item": "a" }),
                            screen_state: None,
                            push_mode: PushMode::Add,
                            transition: Some(TransitionSpec::push_only("in", "out")),
                            view_state: Some(json!({ "cursor": 3 })),
                        },
                    ],
                },
                TabSnapshot {
                    id: "settings".to_string(),
                    entries: vec![],
                },
            ],
        )
    }

    #[test]
    fn json_layout_matches_persisted_contract() {
        let raw = sample().to_json().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["activeTabId"], json!("home"));
        assert_eq!(value["tabs"][0]["id"], json!("home"));
        let entry = &value["tabs"][0]["entries"][0];
        assert_eq!(entry["screenType"], json!("feed"));
        assert_eq!(entry["screenArgs"], json!({ "page": 1 }));
        assert_eq!(entry["screenState"], json!({ "scroll": 42 }));
        assert_eq!(entry["pushMode"], json!("Replace"));
        assert!(entry.get("transition").is_none());
        assert!(entry.get("viewState").is_none());
        let layered = &value["tabs"][0]["entries"][1];
        assert_eq!(layered["pushMode"], json!("Add"));
        assert_eq!(layered["transition"]["pushIn"], json!("in"));
        assert_eq!(layered["viewState"], json!({ "cursor": 3 }));
    }

    #[test]
    fn json_round_trip_preserves_structure() {
        let snapshot = sample().seal();
        let raw = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&raw).unwrap();
        assert_eq!(back, snapshot);
        assert!(back.verify());
    }

    #[test]
    fn sealed_snapshot_detects_tampering() {
        let snapshot = sample().seal();
        assert!(snapshot.verify());

        let mut tampered = snapshot.clone();
        tampered.tabs[0].entries[0].screen_args = json!({ "page": 2 });
        assert!(!tampered.verify());

        let mut relabeled = snapshot;
        relabeled.active_tab_id = "settings".to_string();
        assert!(!relabeled.verify());
    }

    #[test]
    fn unsealed_snapshot_verifies() {
        assert!(sample().verify());
    }

    #[test]
    fn writer_reader_round_trip() {
        let snapshot = sample().seal();
        let mut buffer = Vec::new();
        snapshot.write_to(&mut buffer).unwrap();
        let back = Snapshot::read_from(buffer.as_slice()).unwrap();
        assert_eq!(back, snapshot);
    }
}
