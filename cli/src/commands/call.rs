use anyhow::Context;
use serde_json::{Map, Value};

use airfresh_common::{success, warn};
use airfresh_core::airfresh::services::{ATTR_ENTITY_ID, ATTR_SPEED};

use crate::session::Session;

/// Builds the service data from `--data`, `--speed` and `--entity`. Explicit
/// flags override keys of the same name in `--data`.
pub fn service_data(data: Option<&str>, speed: Option<&str>, entities: &[String]) -> anyhow::Result<Value> {
    let mut map: Map<String, Value> = match data {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("--data is not valid JSON")? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => anyhow::bail!("--data must be a JSON object, got {other}"),
        },
        None => Map::new(),
    };

    if let Some(speed) = speed {
        let value: Value = serde_json::from_str(speed).unwrap_or_else(|_| Value::String(speed.to_string()));
        map.insert(ATTR_SPEED.to_string(), value);
    }

    if !entities.is_empty() {
        let ids: Vec<Value> = entities.iter().cloned().map(Value::String).collect();
        map.insert(ATTR_ENTITY_ID.to_string(), Value::Array(ids));
    }

    Ok(Value::Object(map))
}

pub async fn call(
    session: &mut Session,
    service: &str,
    speed: Option<&str>,
    data: Option<&str>,
) -> anyhow::Result<()> {
    let data: Value = service_data(data, speed, &session.selection)?;
    let handled: Vec<String> = session.hub.call_service(service, &data).await?;

    if handled.is_empty() {
        warn!("{service} reached no entity");
    }
    for id in handled {
        success!("{service} sent to {id}");
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_override_data() {
        let data = service_data(
            Some(r#"{"speed": 10, "entity_id": "fan.a"}"#),
            Some("120"),
            &["fan.b".to_string()],
        )
        .unwrap();

        assert_eq!(data, json!({"speed": 120, "entity_id": ["fan.b"]}));
    }

    #[test]
    fn non_numeric_speed_is_passed_as_text() {
        let data = service_data(None, Some("fast"), &[]).unwrap();
        assert_eq!(data, json!({"speed": "fast"}));
    }

    #[test]
    fn data_must_be_an_object() {
        assert!(service_data(Some("[1, 2]"), None, &[]).is_err());
        assert!(service_data(Some("{"), None, &[]).is_err());
    }
}
