use std::collections::{HashMap, HashSet};
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use tracing_actix_web::TracingLogger;

/// In-memory Ethereum node answering the handful of methods the scanner uses
#[derive(Default)]
pub struct MockNode {
    /// Block payloads by number; missing numbers answer `null`
    pub blocks: HashMap<u64, Value>,
    /// Hex wei balances by address; missing addresses answer "0x0"
    pub balances: HashMap<String, Value>,
    /// Addresses whose balance lookup answers a JSON-RPC error
    pub failing: HashSet<String>,
    /// Addresses whose code lookup answers a JSON-RPC error
    pub failing_code: HashSet<String>,
    /// Deployed code by address; missing addresses answer "0x"
    pub codes: HashMap<String, String>,
    /// callTracer frames by transaction hash
    pub traces: HashMap<String, Value>,
    /// Every request body received, in order
    pub requests: Mutex<Vec<Value>>,
}

impl MockNode {
    pub fn with_block(mut self, number: u64, block: Value) -> Self {
        self.blocks.insert(number, block);
        self
    }

    pub fn with_balance(mut self, address: &str, wei_hex: &str) -> Self {
        self.balances.insert(address.to_string(), json!(wei_hex));
        self
    }

    pub fn with_failing_balance(mut self, address: &str) -> Self {
        self.failing.insert(address.to_string());
        self
    }

    pub fn with_code(mut self, address: &str, code: &str) -> Self {
        self.codes.insert(address.to_string(), code.to_string());
        self
    }

    pub fn with_failing_code(mut self, address: &str) -> Self {
        self.failing_code.insert(address.to_string());
        self
    }

    pub fn with_trace(mut self, tx_hash: &str, frame: Value) -> Self {
        self.traces.insert(tx_hash.to_string(), frame);
        self
    }

    /// Requests received so far for `method`
    pub fn calls(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request["method"] == method)
            .cloned()
            .collect()
    }

    fn answer(&self, method: &str, params: &[Value]) -> Result<Value, (i64, String)> {
        match method {
            "eth_getBlockByNumber" => {
                let number = params[0]
                    .as_str()
                    .and_then(|hex| hex.strip_prefix("0x"))
                    .and_then(|hex| u64::from_str_radix(hex, 16).ok())
                    .ok_or((-32602_i64, "invalid block number".to_string()))?;
                Ok(self.blocks.get(&number).cloned().unwrap_or(Value::Null))
            }
            "eth_getBalance" => {
                let address = params[0].as_str().unwrap_or_default();
                if self.failing.contains(address) {
                    return Err((-32000, format!("missing trie node for {}", address)));
                }
                Ok(self.balances.get(address).cloned().unwrap_or(json!("0x0")))
            }
            "eth_getCode" => {
                let address = params[0].as_str().unwrap_or_default();
                if self.failing_code.contains(address) {
                    return Err((-32000, format!("state unavailable for {}", address)));
                }
                Ok(json!(self.codes.get(address).map(String::as_str).unwrap_or("0x")))
            }
            "debug_traceTransaction" => {
                let hash = params[0].as_str().unwrap_or_default();
                Ok(self.traces.get(hash).cloned().unwrap_or(json!({ "type": "CALL" })))
            }
            other => Err((-32601, format!("the method {} does not exist", other))),
        }
    }
}

async fn rpc(node: web::Data<MockNode>, body: web::Json<Value>) -> HttpResponse {
    let request = body.into_inner();
    node.requests.lock().unwrap().push(request.clone());

    let method = request["method"].as_str().unwrap_or_default();
    let params = request["params"].as_array().cloned().unwrap_or_default();

    let response = match node.answer(method, &params) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": request["id"], "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": { "code": code, "message": message }
        }),
    };
    HttpResponse::Ok().json(response)
}

/// Serve `node` on a free local port and return its URL, shared state and server handle.
///
/// Must be called from within an actix runtime (e.g. `#[actix_web::test]`).
pub fn spawn_node(node: MockNode) -> (String, web::Data<MockNode>, ServerHandle) {
    let node = web::Data::new(node);
    let app_node = node.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(app_node.clone())
            .route("/", web::post().to(rpc))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("Could not bind mock node");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{}", addr), node, handle)
}

/// URL of a local port with nothing listening on it
pub fn dead_node_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Fresh path in the temp directory for a test report
pub fn temp_report(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}_{}.csv", name, std::process::id()))
}

/// A transaction object as returned inside a full block
pub fn tx(hash: &str, from: &str, to: Option<&str>) -> Value {
    json!({ "hash": hash, "from": from, "to": to, "value": "0x0" })
}

/// A block payload holding `transactions`
pub fn block(number: u64, transactions: Vec<Value>) -> Value {
    json!({ "number": format!("0x{:x}", number), "transactions": transactions })
}
