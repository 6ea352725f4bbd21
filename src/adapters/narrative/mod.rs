//! HTTP narrative adapter: Implementation of NarrativeProvider.
//!
//! Streams a hematology commentary from an OpenAI-compatible chat
//! completions endpoint using server-sent events.
//!
//! The response body is read line by line; each `data: ` line carries a
//! JSON chunk whose `choices[0].delta.content` is forwarded to the caller.

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::StatusCode;
use serde::Serialize;

use crate::ports::{CancelFlag, NarrativeError, NarrativeProvider, NarrativeRequest};

/// Default chat completions endpoint.
pub const DEFAULT_NARRATIVE_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_NARRATIVE_MODEL: &str = "google/gemini-3-flash-preview";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest silence tolerated between two reads of a streamed body.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// How often a waiting stream checks its cancel flag.
const CANCEL_POLL: Duration = Duration::from_millis(100);

const SYSTEM_PROMPT: &str = "You are a senior hematologist AI assistant specializing in anemia diagnosis. Given CBC (Complete Blood Count) data and a preliminary classification, provide:
1. A detailed clinical interpretation of the CBC results
2. Differential diagnosis considerations
3. Recommended follow-up tests
4. Treatment considerations based on the anemia type
5. Key risk factors and prognosis

Be specific, evidence-based, and use medical terminology appropriately. Format with clear headers using markdown. Keep response concise but thorough (max 400 words).";

/// Endpoint settings for the narrative client.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub idle_timeout: Duration,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NARRATIVE_URL.to_string(),
            model: DEFAULT_NARRATIVE_MODEL.to_string(),
            api_key: None,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Blocking HTTP client for streamed narratives.
pub struct HttpNarrativeClient {
    client: Client,
    config: NarrativeConfig,
}

impl HttpNarrativeClient {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    /// Returns `NarrativeError::Transport` if the HTTP client cannot be built.
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        let client = client_builder(config.idle_timeout)
            .build()
            .map_err(|e| NarrativeError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Whether an API key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

// The blocking client applies `timeout` to each body read, so a stalled
// stream fails after `idle_timeout` instead of hanging its reader thread.
fn client_builder(idle_timeout: Duration) -> ClientBuilder {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(idle_timeout)
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

/// Prompt listing the panel and the preliminary classification.
#[must_use]
pub fn user_prompt(request: &NarrativeRequest) -> String {
    let c = &request.cbc_data;
    format!(
        "Patient CBC Data:
- Hemoglobin: {} g/dL
- Hematocrit: {}%
- RBC: {} M/µL
- MCV: {} fL
- MCH: {} pg
- MCHC: {} g/dL
- RDW: {}%
- WBC: {} K/µL
- Platelets: {} K/µL
- Serum Iron: {} µg/dL
- Ferritin: {} ng/mL
- Gender: {}, Age: {}

Preliminary Classification: {}
Risk Level: {} (Score: {}/100)

Provide your expert clinical analysis.",
        c.hemoglobin,
        c.hematocrit,
        c.rbc,
        c.mcv,
        c.mch,
        c.mchc,
        c.rdw,
        c.wbc,
        c.platelets,
        c.iron,
        c.ferritin,
        c.sex.key(),
        c.age,
        request.classification,
        request.risk_level.as_str(),
        request.risk_score,
    )
}

/// One decoded server-sent event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Blank, comment, non-data, or data without content
    Skip,
    /// Text delta to append
    Delta(String),
    /// End-of-stream marker
    Done,
}

/// Decode one line of an SSE chat completion stream.
#[must_use]
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.trim().is_empty() || line.starts_with(':') {
        return SseLine::Skip;
    }
    let Some(payload) = line.strip_prefix("data: ") else {
        return SseLine::Skip;
    };

    let payload = payload.trim();
    if payload == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(chunk) => match chunk["choices"][0]["delta"]["content"].as_str() {
            Some(content) if !content.is_empty() => SseLine::Delta(content.to_string()),
            _ => SseLine::Skip,
        },
        Err(e) => {
            tracing::debug!("Skipping undecodable narrative chunk: {}", e);
            SseLine::Skip
        }
    }
}

fn status_error(status: StatusCode, body: String) -> NarrativeError {
    match status.as_u16() {
        429 => NarrativeError::RateLimited,
        402 => NarrativeError::CreditsExhausted,
        code => NarrativeError::Http {
            status: code,
            message: body,
        },
    }
}

impl NarrativeProvider for HttpNarrativeClient {
    fn stream(
        &self,
        request: &NarrativeRequest,
        cancel: &CancelFlag,
        on_chunk: &mut dyn FnMut(&str),
    ) -> Result<(), NarrativeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| NarrativeError::NotConfigured("no API key".to_string()))?;

        let prompt = user_prompt(request);
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            stream: true,
        };

        tracing::info!("Requesting narrative from {}", self.config.model);

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| NarrativeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Narrative gateway error: {}", status);
            return Err(status_error(status, text));
        }

        // Reads block, so they run on their own thread while this loop keeps
        // watching the cancel flag.
        let (line_tx, line_rx) = mpsc::channel::<std::io::Result<Vec<u8>>>();
        thread::spawn(move || {
            let mut reader = BufReader::new(response);
            loop {
                let mut buf = Vec::new();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        if line_tx.send(Ok(buf)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = line_tx.send(Err(e));
                        break;
                    }
                }
            }
        });

        loop {
            if cancel.is_cancelled() {
                return Err(NarrativeError::Cancelled);
            }

            let line = match line_rx.recv_timeout(CANCEL_POLL) {
                Ok(Ok(line)) => line,
                Ok(Err(e)) => return Err(NarrativeError::Transport(e.to_string())),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            match parse_sse_line(&String::from_utf8_lossy(&line)) {
                SseLine::Skip => {}
                SseLine::Delta(text) => on_chunk(&text),
                SseLine::Done => break,
            }
        }

        tracing::debug!("Narrative stream finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analyze, samples};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Instant;

    /// Serve one request: SSE headers, the given chunk, then silence.
    fn stalling_server(first_chunk: &'static str, silence: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have address");

        thread::spawn(move || {
            let Ok((mut socket, _)) = listener.accept() else {
                return;
            };
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request);

            let head = "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nTransfer-Encoding: chunked\r\n\r\n";
            let chunk = format!("{:x}\r\n{}\r\n", first_chunk.len(), first_chunk);
            let _ = socket.write_all(head.as_bytes());
            let _ = socket.write_all(chunk.as_bytes());
            let _ = socket.flush();

            thread::sleep(silence);
        });

        format!("http://{addr}/v1/chat/completions")
    }

    fn local_client(url: String, idle_timeout: Duration) -> HttpNarrativeClient {
        let client = client_builder(idle_timeout)
            .no_proxy()
            .build()
            .expect("Should build");
        HttpNarrativeClient {
            client,
            config: NarrativeConfig {
                url,
                api_key: Some("test-key".to_string()),
                idle_timeout,
                ..NarrativeConfig::default()
            },
        }
    }

    fn iron_request() -> NarrativeRequest {
        let input = samples::find("iron-def").expect("Sample exists").data;
        NarrativeRequest::new(&input, &analyze(&input))
    }

    #[test]
    fn test_parse_delta() {
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"Iron\"}}]}\r\n";
        assert_eq!(parse_sse_line(line), SseLine::Delta("Iron".to_string()));
    }

    #[test]
    fn test_parse_done_and_skips() {
        assert_eq!(parse_sse_line("data: [DONE]\n"), SseLine::Done);
        assert_eq!(parse_sse_line("\n"), SseLine::Skip);
        assert_eq!(parse_sse_line(": keep-alive\n"), SseLine::Skip);
        assert_eq!(parse_sse_line("event: message\n"), SseLine::Skip);
        assert_eq!(
            parse_sse_line("data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}"),
            SseLine::Skip
        );
        assert_eq!(parse_sse_line("data: {\"choices\":[{\"delta\""), SseLine::Skip);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            NarrativeError::RateLimited
        ));
        assert!(matches!(
            status_error(StatusCode::PAYMENT_REQUIRED, String::new()),
            NarrativeError::CreditsExhausted
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "upstream".to_string()),
            NarrativeError::Http { status: 502, .. }
        ));
    }

    #[test]
    fn test_user_prompt_lists_panel() {
        let input = samples::find("b12-def").expect("Sample exists").data;
        let request = NarrativeRequest::new(&input, &analyze(&input));
        let prompt = user_prompt(&request);

        assert!(prompt.contains("- MCV: 110 fL"));
        assert!(prompt.contains("- Gender: male, Age: 62"));
        assert!(prompt.contains("Preliminary Classification: Megaloblastic Anemia (B12/Folate)"));
        assert!(prompt.contains("Risk Level: critical (Score: 100/100)"));
    }

    #[test]
    fn test_unconfigured_client_refuses() {
        let client = HttpNarrativeClient::new(NarrativeConfig::default()).expect("Should build");
        assert!(!client.is_configured());

        let input = samples::find("normal").expect("Sample exists").data;
        let request = NarrativeRequest::new(&input, &analyze(&input));
        let err = client
            .stream(&request, &CancelFlag::new(), &mut |_: &str| {})
            .expect_err("Should refuse without key");
        assert!(matches!(err, NarrativeError::NotConfigured(_)));
    }

    #[test]
    fn test_cancel_stops_stalled_stream() {
        let url = stalling_server(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Low ferritin\"}}]}\n\n",
            Duration::from_secs(10),
        );
        let client = local_client(url, Duration::from_secs(30));

        let cancel = CancelFlag::new();
        let canceller = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(300));
            canceller.cancel();
        });

        let mut received = String::new();
        let started = Instant::now();
        let result = client.stream(&iron_request(), &cancel, &mut |chunk: &str| {
            received.push_str(chunk);
        });

        assert!(matches!(result, Err(NarrativeError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(3));
        assert_eq!(received, "Low ferritin");
    }

    #[test]
    fn test_stalled_stream_times_out() {
        let url = stalling_server(": keep-alive\n", Duration::from_secs(10));
        let client = local_client(url, Duration::from_millis(300));

        let started = Instant::now();
        let result = client.stream(&iron_request(), &CancelFlag::new(), &mut |_: &str| {});

        assert!(matches!(result, Err(NarrativeError::Transport(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
