//! JSON envelope of miIO payloads.
//!
//! Requests are `{"id", "method", "params"}` terminated by a NUL byte. Replies
//! carry the request id and either a `result` or an `error` object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: u32,
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    pub id: u32,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

impl Request {
    pub fn new(id: u32, method: impl Into<String>, params: Value) -> Self {
        let params: Value = match params {
            Value::Null => Value::Array(Vec::new()),
            Value::Array(_) => params,
            single => Value::Array(vec![single]),
        };
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes: Vec<u8> = serde_json::to_vec(self)?;
        bytes.push(0);
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let text: String = sanitize(bytes);
        Ok(serde_json::from_str(&text)?)
    }
}

impl Response {
    pub fn ok(id: u32, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let text: String = sanitize(bytes);
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut object = serde_json::Map::new();
        object.insert("id".into(), Value::from(self.id));
        if let Some(result) = &self.result {
            object.insert("result".into(), result.clone());
        }
        if let Some(error) = &self.error {
            object.insert(
                "error".into(),
                serde_json::json!({ "code": error.code, "message": error.message }),
            );
        }
        let mut bytes: Vec<u8> = serde_json::to_vec(&Value::Object(object))?;
        bytes.push(0);
        Ok(bytes)
    }
}

// Firmware pads with NULs and sometimes emits ",," inside arrays.
fn sanitize(bytes: &[u8]) -> String {
    let text: String = String::from_utf8_lossy(bytes).into_owned();
    let trimmed: &str = text.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
    let mut cleaned: String = trimmed.to_string();
    while cleaned.contains(",,") {
        cleaned = cleaned.replace(",,", ",");
    }
    cleaned
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
    fn request_is_nul_terminated_json() {
        let request = Request::new(7, "get_prop", json!(["power", "pm25"]));
        let bytes: Vec<u8> = request.to_bytes().unwrap();

        assert_eq!(bytes.last(), Some(&0));
        let parsed: Value = serde_json::from_slice(&bytes[..bytes.len() - 1]).unwrap();
        assert_eq!(parsed, json!({"id": 7, "method": "get_prop", "params": ["power", "pm25"]}));
    }

    #[test]
    fn scalar_params_are_wrapped() {
        assert_eq!(Request::new(1, "set_mode", json!("auto")).params, json!(["auto"]));
        assert_eq!(Request::new(1, "miIO.info", Value::Null).params, json!([]));
    }

    #[test]
    fn result_reply() {
        let reply = Response::from_bytes(b"{\"id\":3,\"result\":[\"ok\"]}\0\0\0").unwrap();
        assert_eq!(reply.id, 3);
        assert_eq!(reply.result, Some(json!(["ok"])));
        assert!(reply.error.is_none());
    }

    #[test]
    fn error_reply() {
        let reply =
            Response::from_bytes(br#"{"id":4,"error":{"code":-5001,"message":"invalid arg"}}"#)
                .unwrap();
        let error: ErrorObject = reply.error.unwrap();
        assert_eq!(error.code, -5001);
        assert_eq!(error.message, "invalid arg");
    }

    #[test]
    fn doubled_commas_are_tolerated() {
        let reply = Response::from_bytes(br#"{"id":5,"result":[true,,12]}"#).unwrap();
        assert_eq!(reply.result, Some(json!([true, 12])));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(Response::from_bytes(b"not json"), Err(CodecError::Json(_))));
    }
}
