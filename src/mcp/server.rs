//! Line-delimited stdio transport.
//!
//! `rmcp` owns the session: handshake, dispatch, `tools/list`, `tools/call`.
//! Every input line passes through [`screen_line`] first, so that bytes
//! `rmcp` cannot decode get a JSON-RPC error reply instead of ending the
//! session. Accepted lines reach the service over an in-memory duplex pipe;
//! replies from the service and from the screen share one output stream.

use rmcp::ServiceExt;
use rmcp::model::{ClientJsonRpcMessage, ErrorCode};
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::mcp::handler::TrainingServer;

const PIPE_CAPACITY: usize = 64 * 1024;

/// Methods the service implements; a request for one of them that does not
/// decode has bad params rather than an unknown method.
const KNOWN_METHODS: &[&str] = &[
    "initialize",
    "ping",
    "tools/list",
    "tools/call",
    "resources/list",
    "resources/templates/list",
    "resources/read",
    "resources/subscribe",
    "resources/unsubscribe",
    "prompts/list",
    "prompts/get",
    "completion/complete",
    "logging/setLevel",
];

/// What to do with one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Hand the message to the service.
    Forward(String),
    /// Answer directly with this JSON-RPC error.
    Reject(Value),
    /// Nothing to answer.
    Skip,
}

fn error_reply(id: Value, code: ErrorCode, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code.0, "message": message.into() },
    })
}

fn is_notification(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.get("method").is_some_and(Value::is_string) && !obj.contains_key("id"))
}

/// Classify one raw line (trailing newline included or not).
pub fn screen_line(raw: &[u8]) -> Inbound {
    let Ok(text) = std::str::from_utf8(raw) else {
        return Inbound::Reject(error_reply(Value::Null, ErrorCode::PARSE_ERROR, "Parse error: invalid UTF-8"));
    };
    let text = text.trim();
    if text.is_empty() {
        return Inbound::Skip;
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            return Inbound::Reject(error_reply(Value::Null, ErrorCode::PARSE_ERROR, format!("Parse error: {e}")));
        }
    };

    match &value {
        Value::Array(items) if items.is_empty() => {
            Inbound::Reject(error_reply(Value::Null, ErrorCode::INVALID_REQUEST, "Invalid Request: empty batch"))
        }
        Value::Array(items) if items.iter().all(is_notification) => Inbound::Skip,
        Value::Array(_) => Inbound::Reject(error_reply(
            Value::Null,
            ErrorCode::INVALID_REQUEST,
            "Invalid Request: batch messages are not supported",
        )),
        Value::Object(obj) => screen_object(text, obj, &value),
        _ => Inbound::Reject(error_reply(
            Value::Null,
            ErrorCode::INVALID_REQUEST,
            "Invalid Request: expected a JSON object",
        )),
    }
}

fn screen_object(text: &str, obj: &Map<String, Value>, value: &Value) -> Inbound {
    let id = match obj.get("id") {
        None => None,
        Some(id @ Value::String(_)) => Some(id.clone()),
        Some(id @ Value::Number(n)) if n.is_i64() || n.is_u64() => Some(id.clone()),
        Some(Value::Null) => {
            return Inbound::Reject(error_reply(
                Value::Null,
                ErrorCode::INVALID_REQUEST,
                "Invalid Request: id must not be null",
            ));
        }
        Some(_) => {
            return Inbound::Reject(error_reply(
                Value::Null,
                ErrorCode::INVALID_REQUEST,
                "Invalid Request: id must be a string or an integer",
            ));
        }
    };
    let reply_id = id.clone().unwrap_or(Value::Null);

    if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Inbound::Reject(error_reply(
            reply_id,
            ErrorCode::INVALID_REQUEST,
            "Invalid Request: jsonrpc must be \"2.0\"",
        ));
    }

    if serde_json::from_value::<ClientJsonRpcMessage>(value.clone()).is_ok() {
        return Inbound::Forward(text.to_string());
    }

    let method = obj.get("method").and_then(Value::as_str);
    match (method, id) {
        // A response to something we never asked.
        (None, None) if obj.contains_key("result") || obj.contains_key("error") => Inbound::Skip,
        (None, _) => Inbound::Reject(error_reply(
            reply_id,
            ErrorCode::INVALID_REQUEST,
            "Invalid Request: missing method",
        )),
        (Some(method), None) => {
            tracing::debug!(method, "ignoring notification");
            Inbound::Skip
        }
        (Some(method), Some(_)) if KNOWN_METHODS.contains(&method) => Inbound::Reject(error_reply(
            reply_id,
            ErrorCode::INVALID_PARAMS,
            format!("Invalid params for {method}"),
        )),
        (Some(method), Some(_)) => Inbound::Reject(error_reply(
            reply_id,
            ErrorCode::METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )),
    }
}

/// Read lines from `input`, forward the accepted ones, queue rejections.
async fn pump_input<R, W>(
    input: R,
    mut to_server: W,
    rejects: mpsc::UnboundedSender<Value>,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        match screen_line(&buf) {
            Inbound::Forward(line) => {
                to_server.write_all(line.as_bytes()).await?;
                to_server.write_all(b"\n").await?;
                to_server.flush().await?;
            }
            Inbound::Reject(reply) => {
                tracing::warn!(reply = %reply, "rejected input line");
                if rejects.send(reply).is_err() {
                    break;
                }
            }
            Inbound::Skip => {}
        }
    }
    tracing::info!("input closed, shutting down");
    to_server.shutdown().await
}

/// Merge service replies and rejections into `output`, one JSON value per line.
async fn pump_output<R, W>(
    from_server: R,
    mut rejects: mpsc::UnboundedReceiver<Value>,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(from_server).lines();
    let mut server_open = true;
    let mut rejects_open = true;

    while server_open || rejects_open {
        let line = tokio::select! {
            next = lines.next_line(), if server_open => match next? {
                Some(line) => line,
                None => {
                    server_open = false;
                    continue;
                }
            },
            reject = rejects.recv(), if rejects_open => match reject {
                Some(value) => value.to_string(),
                None => {
                    rejects_open = false;
                    continue;
                }
            },
        };
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}

/// Serve MCP over any line-delimited byte streams until `input` closes.
pub async fn serve_lines<R, W>(config: ServerConfig, input: R, output: W) -> Result<(), AppError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tracing::info!(
        name = %config.name,
        version = %config.version,
        "MCP server listening on stdio"
    );

    let (server_end, client_end) = tokio::io::duplex(PIPE_CAPACITY);
    let (from_server, to_server) = tokio::io::split(client_end);
    let (reject_tx, reject_rx) = mpsc::unbounded_channel();

    let reader = tokio::spawn(pump_input(input, to_server, reject_tx));
    let writer = tokio::spawn(pump_output(from_server, reject_rx, output));

    let result = match TrainingServer::new(config)
        .serve(tokio::io::split(server_end))
        .await
    {
        Ok(service) => match service.waiting().await {
            Ok(reason) => {
                tracing::info!(reason = ?reason, "session ended");
                Ok(())
            }
            Err(e) => Err(AppError::new(1, format!("MCP session task failed: {e}"))),
        },
        Err(e) => Err(AppError::new(1, format!("MCP initialization failed: {e}"))),
    };

    reader.abort();
    if let Ok(Err(e)) = reader.await {
        tracing::warn!(error = %e, "input pump failed");
    }
    match writer.await {
        Ok(Err(e)) => tracing::warn!(error = %e, "output pump failed"),
        Err(e) => tracing::warn!(error = %e, "output pump panicked"),
        Ok(Ok(())) => {}
    }
    result
}

/// Serve MCP on the process's stdin/stdout.
pub async fn serve_stdio(config: ServerConfig) -> Result<(), AppError> {
    serve_lines(config, tokio::io::stdin(), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{DuplexStream, Lines};
    use tokio::task::JoinHandle;

    fn rejected(line: &[u8]) -> Value {
        match screen_line(line) {
            Inbound::Reject(reply) => reply,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let reply = rejected(b"\xff\xfe{\"jsonrpc\"}\n");
        assert_eq!(reply["error"]["code"], -32700);
        assert_eq!(reply["id"], Value::Null);
    }

    #[test]
    fn garbage_json_is_a_parse_error() {
        let reply = rejected(b"{not json");
        assert_eq!(reply["error"]["code"], -32700);
        assert_eq!(reply["id"], Value::Null);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(screen_line(b"\r\n"), Inbound::Skip);
        assert_eq!(screen_line(b"   "), Inbound::Skip);
    }

    #[test]
    fn null_id_is_an_invalid_request() {
        let reply = rejected(br#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#);
        assert_eq!(reply["error"]["code"], -32600);
        assert_eq!(reply["id"], Value::Null);
    }

    #[test]
    fn wrong_version_keeps_the_id() {
        let reply = rejected(br#"{"jsonrpc":"1.0","id":4,"method":"ping"}"#);
        assert_eq!(reply["error"]["code"], -32600);
        assert_eq!(reply["id"], 4);
    }

    #[test]
    fn batches() {
        assert_eq!(rejected(b"[]")["error"]["code"], -32600);
        assert_eq!(
            screen_line(br#"[{"jsonrpc":"2.0","method":"notifications/initialized"}]"#),
            Inbound::Skip
        );
        let reply = rejected(br#"[{"jsonrpc":"2.0","id":1,"method":"ping"}]"#);
        assert_eq!(reply["error"]["code"], -32600);
    }

    #[test]
    fn undecodable_requests_are_classified_by_method() {
        // Either the service decodes it (and answers itself) or it is bad params.
        match screen_line(br#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":7}"#) {
            Inbound::Reject(reply) => {
                assert_eq!(reply["error"]["code"], -32602);
                assert_eq!(reply["id"], "a");
            }
            other => assert!(matches!(other, Inbound::Forward(_))),
        }

        let reply = rejected(br#"{"jsonrpc":"2.0","id":2}"#);
        assert_eq!(reply["error"]["code"], -32600);
        assert_eq!(reply["id"], 2);

        let reply = rejected(br#"{"jsonrpc":"2.0","id":3,"method":5}"#);
        assert_eq!(reply["error"]["code"], -32600);
    }

    #[test]
    fn well_formed_messages_are_forwarded() {
        let line = br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;
        assert_eq!(
            screen_line(line),
            Inbound::Forward(String::from_utf8_lossy(line).into_owned())
        );
    }

    struct Session {
        input: DuplexStream,
        output: Lines<BufReader<DuplexStream>>,
        task: JoinHandle<Result<(), AppError>>,
    }

    impl Session {
        fn start() -> Self {
            let (input, server_in) = tokio::io::duplex(PIPE_CAPACITY);
            let (server_out, output) = tokio::io::duplex(PIPE_CAPACITY);
            let task = tokio::spawn(serve_lines(ServerConfig::default(), server_in, server_out));
            Self {
                input,
                output: BufReader::new(output).lines(),
                task,
            }
        }

        async fn send_raw(&mut self, bytes: &[u8]) {
            self.input.write_all(bytes).await.unwrap();
            self.input.flush().await.unwrap();
        }

        async fn send(&mut self, message: Value) {
            self.send_raw(format!("{message}\n").as_bytes()).await;
        }

        async fn recv(&mut self) -> Value {
            let line = self.output.next_line().await.unwrap().expect("server closed output");
            serde_json::from_str(&line).unwrap()
        }

        async fn handshake(&mut self) -> Value {
            self.send(json!({
                "jsonrpc": "2.0",
                "id": 0,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test-client", "version": "0.0.1"}
                }
            }))
            .await;
            let reply = self.recv().await;
            self.send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
                .await;
            reply
        }

        /// Close the input and collect whatever the server still writes.
        async fn finish(self) -> Vec<Value> {
            let Session {
                input,
                mut output,
                task,
            } = self;
            drop(input);
            let mut rest = Vec::new();
            while let Some(line) = output.next_line().await.unwrap() {
                rest.push(serde_json::from_str(&line).unwrap());
            }
            task.await.unwrap().unwrap();
            rest
        }
    }

    fn csv_fixture(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("data.csv");
        let mut body = String::from("a,b,label\n");
        for i in 0..20 {
            body.push_str(&format!("{i},{},{}\n", 20 - i, if i < 10 { "x" } else { "y" }));
        }
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn initialize_echoes_a_supported_version() {
        let mut session = Session::start();
        let reply = session.handshake().await;
        assert_eq!(reply["id"], 0);
        assert_eq!(reply["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(reply["result"]["serverInfo"]["name"], "Classic ML Training Server");
        assert!(reply["result"]["capabilities"]["tools"].is_object());
        assert!(session.finish().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_does_not_end_the_session() {
        let mut session = Session::start();
        session.handshake().await;

        session.send_raw(b"\xff\xfe\xfd\n").await;
        let reply = session.recv().await;
        assert_eq!(reply["error"]["code"], -32700);
        assert_eq!(reply["id"], Value::Null);

        session.send(json!({"jsonrpc": "2.0", "id": 5, "method": "ping"})).await;
        let pong = session.recv().await;
        assert_eq!(pong["id"], 5);
        assert!(pong["result"].is_object());
        assert!(session.finish().await.is_empty());
    }

    #[tokio::test]
    async fn notification_only_batch_is_silent() {
        let mut session = Session::start();
        session.handshake().await;

        session
            .send(json!([{"jsonrpc": "2.0", "method": "notifications/initialized"}]))
            .await;
        session.send(json!({"jsonrpc": "2.0", "id": 9, "method": "ping"})).await;

        assert_eq!(session.recv().await["id"], 9);
        assert!(session.finish().await.is_empty());
    }

    #[tokio::test]
    async fn null_id_gets_an_error_reply() {
        let mut session = Session::start();
        session.handshake().await;

        session
            .send(json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
            .await;
        let reply = session.recv().await;
        assert_eq!(reply["error"]["code"], -32600);
        assert_eq!(reply["id"], Value::Null);
        assert!(session.finish().await.is_empty());
    }

    #[tokio::test]
    async fn tools_list_describes_the_training_tool() {
        let mut session = Session::start();
        session.handshake().await;

        session
            .send(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
            .await;
        let reply = session.recv().await;
        let tools = reply["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "train_classifier_from_csv");
        let schema = &tools[0]["inputSchema"];
        assert!(schema["properties"]["data_path"].is_object());
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"target_column"));
        assert!(!required.contains(&"test_size"));
        session.finish().await;
    }

    #[tokio::test]
    async fn tools_call_returns_structured_results_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = csv_fixture(dir.path());
        let mut session = Session::start();
        session.handshake().await;

        session
            .send(json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {
                    "name": "train_classifier_from_csv",
                    "arguments": {"data_path": path, "target_column": "label"}
                }
            }))
            .await;
        let reply = session.recv().await;
        let result = &reply["result"]["structuredContent"];
        assert!(result["accuracy"].is_number());
        assert_eq!(result["coefficients"].as_array().unwrap().len(), 1);
        assert_eq!(result["intercept"].as_array().unwrap().len(), 1);

        session
            .send(json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "train_classifier_from_csv",
                    "arguments": {"data_path": path, "target_column": "species"}
                }
            }))
            .await;
        let reply = session.recv().await;
        assert_eq!(
            reply["result"]["structuredContent"]["error"],
            "Target column 'species' not found in data."
        );
        session.finish().await;
    }

    #[tokio::test]
    async fn bad_arguments_are_reported() {
        let mut session = Session::start();
        session.handshake().await;

        session
            .send(json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {
                    "name": "train_classifier_from_csv",
                    "arguments": {"data_path": "x.csv"}
                }
            }))
            .await;
        let reply = session.recv().await;
        assert_eq!(reply["id"], 4);
        assert!(reply.get("error").is_some() || reply["result"]["isError"] == true);
        session.finish().await;
    }
}
