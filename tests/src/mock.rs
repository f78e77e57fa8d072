//! A fake Air Fresh A1 answering on a loopback UDP socket.
//!
//! It speaks the real wire format: hello replies, encrypted requests and
//! replies, and keeps a property table the set commands act on.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Value, json};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use airfresh_common::token::Token;
use airfresh_core::network::{ClientOptions, MiioClient};
use airfresh_protocols::message::{ErrorObject, Request, Response};
use airfresh_protocols::packet::{self, Header};

pub const MOCK_TOKEN: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";
pub const MOCK_DEVICE_ID: u32 = 0x0BAD_CAFE;
pub const MOCK_MODEL: &str = "dmaker.airfresh.a1";

/// Knobs a test can turn before or between requests.
#[derive(Debug, Default)]
pub struct Behaviour {
    /// Requests to swallow without a reply.
    pub drop_requests: usize,
    /// Error replies to send instead of handling the next requests.
    pub errors: VecDeque<(i64, String)>,
    /// Send the token in the hello reply, like an unprovisioned device.
    pub expose_token: bool,
    /// Answer the next request with a reply for an older id first.
    pub stale_reply: bool,
    /// Answer `get_prop` with one value too few.
    pub short_get_prop: bool,
}

#[derive(Debug)]
pub struct MockState {
    pub props: HashMap<String, Value>,
    pub requests: Vec<Request>,
    pub hellos: usize,
    pub stamp: u32,
    pub behaviour: Behaviour,
}

impl Default for MockState {
    fn default() -> Self {
        let props: HashMap<String, Value> = [
            ("power", json!("on")),
            ("pm25", json!(12)),
            ("co2", json!(612)),
            ("temperature_outside", json!(21)),
            ("favourite_speed", json!(80)),
            ("filter_rate", json!(87)),
            ("filter_day", json!(143)),
            ("control_speed", json!(70)),
            ("ptc_on", json!(false)),
            ("ptc_status", json!(false)),
            ("child_lock", json!(false)),
            ("sound", json!(true)),
            ("display", json!(true)),
            ("mode", json!("auto")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            props,
            requests: Vec::new(),
            hellos: 0,
            stamp: 1000,
            behaviour: Behaviour::default(),
        }
    }
}

pub struct MockDevice {
    addr: SocketAddr,
    token: Token,
    state: Arc<Mutex<MockState>>,
    task: JoinHandle<()>,
}

impl MockDevice {
    pub async fn start() -> anyhow::Result<Self> {
        let socket: UdpSocket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = socket.local_addr()?;
        let token: Token = MOCK_TOKEN.parse()?;
        let state: Arc<Mutex<MockState>> = Arc::new(Mutex::new(MockState::default()));

        let task: JoinHandle<()> = tokio::spawn(serve(socket, token, state.clone()));
        Ok(Self {
            addr,
            token,
            state,
            task,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn methods(&self) -> Vec<String> {
        self.state().requests.iter().map(|r| r.method.clone()).collect()
    }

    pub async fn client(&self, options: ClientOptions) -> anyhow::Result<MiioClient> {
        Ok(MiioClient::connect_addr(self.addr, self.token, options).await?)
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(socket: UdpSocket, token: Token, state: Arc<Mutex<MockState>>) {
    let mut buffer: Vec<u8> = vec![0u8; 4096];
    loop {
        let Ok((len, peer)) = socket.recv_from(&mut buffer).await else {
            return;
        };
        for reply in respond(&token, &state, &buffer[..len]) {
            let _ = socket.send_to(&reply, peer).await;
        }
    }
}

fn respond(token: &Token, state: &Mutex<MockState>, bytes: &[u8]) -> Vec<Vec<u8>> {
    let Ok(header) = Header::parse(bytes) else {
        return Vec::new();
    };
    let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    state.stamp += 1;
    let stamp: u32 = state.stamp;

    if header.is_hello() {
        state.hellos += 1;
        let field: [u8; 16] = if state.behaviour.expose_token {
            *token.as_bytes()
        } else {
            [0xFF; 16]
        };
        return vec![packet::hello_reply(MOCK_DEVICE_ID, stamp, field).to_vec()];
    }

    let Ok((_, plaintext)) = packet::decode(token, bytes) else {
        return Vec::new();
    };
    let Ok(request) = Request::from_bytes(&plaintext) else {
        return Vec::new();
    };
    state.requests.push(request.clone());

    if state.behaviour.drop_requests > 0 {
        state.behaviour.drop_requests -= 1;
        return Vec::new();
    }

    let mut responses: Vec<Response> = Vec::new();
    if std::mem::take(&mut state.behaviour.stale_reply) {
        responses.push(Response::ok(request.id.wrapping_sub(1), json!(["ok"])));
    }

    let response: Response = match state.behaviour.errors.pop_front() {
        Some((code, message)) => Response {
            id: request.id,
            result: None,
            error: Some(ErrorObject { code, message }),
        },
        None => match handle(&mut state, &request) {
            Ok(result) => Response::ok(request.id, result),
            Err((code, message)) => Response {
                id: request.id,
                result: None,
                error: Some(ErrorObject { code, message }),
            },
        },
    };
    responses.push(response);

    responses
        .iter()
        .filter_map(|response| response.to_bytes().ok())
        .filter_map(|payload| packet::encode(token, MOCK_DEVICE_ID, stamp, &payload).ok())
        .collect()
}

fn first_param(request: &Request) -> Value {
    request.params.get(0).cloned().unwrap_or(Value::Null)
}

fn handle(state: &mut MockState, request: &Request) -> Result<Value, (i64, String)> {
    let ok: Value = json!(["ok"]);
    match request.method.as_str() {
        "get_prop" => {
            let names: &[Value] = request.params.as_array().map(Vec::as_slice).unwrap_or(&[]);
            let mut values: Vec<Value> = names
                .iter()
                .map(|name| name.as_str().and_then(|n| state.props.get(n)).cloned().unwrap_or(Value::Null))
                .collect();
            if state.behaviour.short_get_prop {
                values.pop();
            }
            Ok(Value::Array(values))
        }
        "set_power" => {
            let on: bool = first_param(request).as_bool().unwrap_or(false);
            state.props.insert("power".into(), json!(if on { "on" } else { "off" }));
            Ok(ok)
        }
        "set_mode" => {
            state.props.insert("mode".into(), first_param(request));
            Ok(ok)
        }
        "set_ptc_on" => {
            state.props.insert("ptc_on".into(), first_param(request));
            Ok(ok)
        }
        "set_sound_on" => {
            state.props.insert("sound".into(), first_param(request));
            Ok(ok)
        }
        "set_display_on" => {
            state.props.insert("display".into(), first_param(request));
            Ok(ok)
        }
        "set_filter_reset" => {
            state.props.insert("filter_rate".into(), json!(100));
            state.props.insert("filter_day".into(), json!(180));
            Ok(ok)
        }
        "set_favourite_speed" => {
            state.props.insert("favourite_speed".into(), first_param(request));
            Ok(ok)
        }
        "miIO.info" => Ok(json!({
            "model": MOCK_MODEL,
            "fw_ver": "1.2.4_56",
            "hw_ver": "esp32",
            "mac": "54:48:E6:00:00:01",
            "life": 1234,
            "ap": { "ssid": "home", "rssi": -52 },
            "netif": { "localIp": "127.0.0.1" },
        })),
        other => Err((-32601, format!("Method {other} not found"))),
    }
}
