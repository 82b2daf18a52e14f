//! Tool calls issued by the conversational video agent.
//!
//! # Responsibility
//! - Dispatch named tool calls with JSON parameters to catalog lookups and
//!   the diagnosis engine.
//! - Keep a short rolling log of recent utterances for call context.
//!
//! # Invariants
//! - Unknown tools yield `{"error": "Unknown tool call"}`, not an `Err`.
//! - The utterance log never holds more than `MAX_UTTERANCES` entries.

use crate::model::department::{find_by_exact_name, find_by_name};
use crate::repo::kv_repo::KvStore;
use crate::repo::RepoError;
use crate::triage::diagnosis::{diagnose, response_text};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const UTTERANCE_KEY: &str = "recent_utterances";
pub const MAX_UTTERANCES: usize = 10;

const DEFAULT_WALK_TIME: &str = "2-5 minutes";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    #[serde(default)]
    pub parameters: Value,
}

#[derive(Debug)]
pub enum ToolError {
    MissingParameter(&'static str),
    Encode(serde_json::Error),
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParameter(name) => write!(f, "missing tool parameter `{name}`"),
            Self::Encode(err) => write!(f, "failed to encode tool result: {err}"),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingParameter(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

/// Runs one tool call and returns its JSON result.
pub fn dispatch(call: &ToolCall) -> Result<Value, ToolError> {
    log::info!(
        "event=tool_call module=tools status=start tool={}",
        call.tool_name
    );
    match call.tool_name.as_str() {
        "diagnoseSymptom" => diagnose_symptom(&call.parameters),
        "getDepartmentInfo" => Ok(department_info(&call.parameters)),
        "getWaitingRoomInfo" => Ok(waiting_room_info(&call.parameters)),
        "provideDirections" => Ok(directions(&call.parameters)),
        other => {
            log::warn!("event=tool_call module=tools status=error reason=unknown_tool tool={other}");
            Ok(json!({ "error": "Unknown tool call" }))
        }
    }
}

fn diagnose_symptom(parameters: &Value) -> Result<Value, ToolError> {
    let symptom = text_param(parameters, "symptom")
        .or_else(|| text_param(parameters, "symptoms"))
        .ok_or(ToolError::MissingParameter("symptom"))?;

    let diagnosis = diagnose(&symptom);
    let response = response_text(&diagnosis);
    let mut value = serde_json::to_value(&diagnosis).map_err(ToolError::Encode)?;
    if let Value::Object(map) = &mut value {
        map.insert("response".to_string(), Value::String(response));
    }
    log::info!(
        "event=tool_call module=tools status=ok tool=diagnoseSymptom confidence={}",
        diagnosis.confidence
    );
    Ok(value)
}

fn department_info(parameters: &Value) -> Value {
    let query = text_param(parameters, "department").unwrap_or_default();
    match find_by_name(&query) {
        Some(info) => json!({
            "name": info.name,
            "floor": info.floor,
            "description": info.description,
            "urgencyLevel": info.urgency,
        }),
        None => json!({ "error": "Department not found" }),
    }
}

fn waiting_room_info(parameters: &Value) -> Value {
    let name = text_param(parameters, "department").unwrap_or_default();
    match find_by_exact_name(&name) {
        Some(info) => json!({
            "currentWait": info.waiting_room.current_wait,
            "patientsWaiting": info.waiting_room.patients_waiting,
        }),
        None => json!({ "currentWait": "Unknown", "patientsWaiting": 0 }),
    }
}

fn directions(parameters: &Value) -> Value {
    let name = text_param(parameters, "department").unwrap_or_default();
    let route = find_by_exact_name(&name)
        .map(|info| info.directions)
        .unwrap_or("Directions not available");
    json!({
        "directions": route,
        "estimatedWalkTime": DEFAULT_WALK_TIME,
    })
}

/// Non-empty string parameter; arrays of strings are joined with `, `.
fn text_param(parameters: &Value, name: &str) -> Option<String> {
    let text = match parameters.get(name)? {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub transcript: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Rolling window of the latest agent utterances.
pub struct UtteranceLog<S: KvStore> {
    store: S,
}

impl<S: KvStore> UtteranceLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends one utterance, dropping the oldest beyond `MAX_UTTERANCES`.
    pub fn record(&self, transcript: impl Into<String>, now_ms: i64) -> Result<(), RepoError> {
        let mut entries = self.recent()?;
        entries.push(Utterance {
            transcript: transcript.into(),
            timestamp: now_ms,
        });
        if entries.len() > MAX_UTTERANCES {
            let excess = entries.len() - MAX_UTTERANCES;
            entries.drain(..excess);
        }
        let text = serde_json::to_string(&entries).map_err(|source| RepoError::Json {
            key: UTTERANCE_KEY.to_string(),
            source,
        })?;
        self.store.set(UTTERANCE_KEY, &text)?;
        log::debug!(
            "event=utterance_record module=tools status=ok retained={}",
            entries.len()
        );
        Ok(())
    }

    /// Stored utterances, oldest first.
    pub fn recent(&self) -> Result<Vec<Utterance>, RepoError> {
        match self.store.get(UTTERANCE_KEY)? {
            Some(text) => serde_json::from_str(&text).map_err(|source| RepoError::Json {
                key: UTTERANCE_KEY.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{dispatch, ToolCall, ToolError, UtteranceLog, MAX_UTTERANCES};
    use crate::repo::kv_repo::MemoryKvStore;
    use serde_json::json;

    fn call(tool_name: &str, parameters: serde_json::Value) -> ToolCall {
        ToolCall {
            tool_name: tool_name.to_string(),
            parameters,
        }
    }

    #[test]
    fn unknown_tool_returns_error_payload() {
        let result = dispatch(&call("orderPizza", json!({}))).expect("dispatch");
        assert_eq!(result, json!({ "error": "Unknown tool call" }));
    }

    #[test]
    fn diagnose_requires_a_symptom() {
        let err = dispatch(&call("diagnoseSymptom", json!({ "symptom": "  " })))
            .expect_err("blank symptom");
        assert!(matches!(err, ToolError::MissingParameter(_)));
    }

    #[test]
    fn diagnose_accepts_symptom_list() {
        let result = dispatch(&call(
            "diagnoseSymptom",
            json!({ "symptoms": ["heart palpitations", "irregular heartbeat"] }),
        ))
        .expect("dispatch");
        assert_eq!(result["department"], "Cardiology Department");
        assert!(result["response"]
            .as_str()
            .expect("response text")
            .contains("Cardiology Department"));
    }

    #[test]
    fn waiting_room_falls_back_for_unknown_department() {
        let result = dispatch(&call(
            "getWaitingRoomInfo",
            json!({ "department": "Cardiology" }),
        ))
        .expect("dispatch");
        assert_eq!(result, json!({ "currentWait": "Unknown", "patientsWaiting": 0 }));
    }

    #[test]
    fn utterance_log_keeps_latest_entries() {
        let log = UtteranceLog::new(MemoryKvStore::new());
        for index in 0..(MAX_UTTERANCES + 3) {
            log.record(format!("line {index}"), index as i64).expect("record");
        }
        let recent = log.recent().expect("recent");
        assert_eq!(recent.len(), MAX_UTTERANCES);
        assert_eq!(recent[0].transcript, "line 3");
        assert_eq!(recent[MAX_UTTERANCES - 1].timestamp, 12);
    }
}
