// Parsing of WAMP frames delivered by the LCU WebSocket

pub const SUBSCRIBE_JSON_API_EVENTS: &str = "[5, \"OnJsonApiEvent\"]";
pub const GAMEFLOW_PHASE_URI: &str = "/lol-gameflow/v1/gameflow-phase";
pub const CHAMP_SELECT_SESSION_URI: &str = "/lol-champ-select/v1/session";

const EVENT_OPCODE: i64 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct LcuEvent {
    pub uri: String,
    pub event_type: String,
    pub data: serde_json::Value,
}

/// Parse `[8, "OnJsonApiEvent", { uri, eventType, data }]`. Anything else yields `None`.
pub fn parse_lcu_ws_event(text: &str) -> Option<LcuEvent> {
    let val: serde_json::Value = serde_json::from_str(text).ok()?;
    let arr = val.as_array()?;
    if arr.len() < 3 || arr[0].as_i64() != Some(EVENT_OPCODE) {
        return None;
    }
    let obj = arr[2].as_object()?;
    let uri = obj.get("uri").and_then(|v| v.as_str())?.to_string();
    let event_type = obj
        .get("eventType")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let data = obj.get("data").cloned().unwrap_or(serde_json::Value::Null);
    Some(LcuEvent {
        uri,
        event_type,
        data,
    })
}
