// src/api_handler.rs

use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::Rng;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::engine::AnalysisEngine;
use crate::models::{AnalysisRequest, AnalysisResult};

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Key added to every outgoing document to record where it came from.
pub const PROVENANCE_KEY: &str = "analysisMode";

/// Result tagged with where it was computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Body returned by the analysis service, passed through untouched.
    Remote(Value),
    LocalSimulated(AnalysisResult),
}

impl Analysis {
    pub fn provenance(&self) -> &'static str {
        match self {
            Analysis::Remote(_) => "remote",
            Analysis::LocalSimulated(_) => "local-simulated",
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        let mut doc = match self {
            Analysis::Remote(body) => body.clone(),
            Analysis::LocalSimulated(result) => {
                serde_json::to_value(result).context("failed to serialize analysis result")?
            }
        };
        if let Value::Object(map) = &mut doc {
            map.insert(PROVENANCE_KEY.to_string(), json!(self.provenance()));
        }
        Ok(doc)
    }
}

#[derive(Debug, Deserialize)]
struct HealthStatus {
    status: String,
}

/// Client for the remote analysis service (`/health`, `/analyze`).
pub struct RemoteAnalyzer {
    client: Client,
    base_url: String,
}

impl RemoteAnalyzer {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("misfold-analyzer/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `true` only when the service answers `{"status": "healthy"}`.
    pub fn check_health(&self) -> bool {
        match self.fetch_health() {
            Ok(health) => {
                debug!("Analysis service status: {}", health.status);
                health.status == "healthy"
            }
            Err(e) => {
                warn!("Analysis service not available: {:#}", e);
                false
            }
        }
    }

    fn fetch_health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send()?.error_for_status()?;
        Ok(response.json()?)
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<Value> {
        let url = format!("{}/analyze", self.base_url);
        let body = json!({
            "proteinName": request.protein_name,
            "proteinSequence": request.protein_sequence.as_deref().unwrap_or(""),
        });

        info!("Sending '{}' to {}", request.protein_name, url);
        let result = self.send_with_retry(&url, || self.client.post(&url).json(&body))?;
        if !result.is_object() {
            bail!("Analysis service at {} returned a non-object body", url);
        }
        Ok(result)
    }

    /// Ask the service first; run the local engine when it is unhealthy or the
    /// request fails.
    pub fn analyze_with_fallback<R: Rng>(
        &self,
        engine: &mut AnalysisEngine<R>,
        request: &AnalysisRequest,
    ) -> Analysis {
        if !self.check_health() {
            warn!("Falling back to local simulated analysis");
            return Analysis::LocalSimulated(engine.analyze(request));
        }

        match self.analyze(request) {
            Ok(body) => Analysis::Remote(body),
            Err(e) => {
                warn!("Remote analysis failed, falling back to local simulation: {:#}", e);
                Analysis::LocalSimulated(engine.analyze(request))
            }
        }
    }

    fn send_with_retry(&self, url: &str, build: impl Fn() -> RequestBuilder) -> Result<Value> {
        let mut attempts = 0;

        loop {
            let response = build().send()?;

            if response.status().is_success() {
                return Ok(response.json()?);
            } else if response.status() == StatusCode::TOO_MANY_REQUESTS {
                attempts += 1;
                if attempts >= MAX_ATTEMPTS {
                    bail!("Exceeded maximum retries for URL: {}", url);
                }

                let wait_time = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!("Rate limited. Waiting {} seconds before retrying...", wait_time);
                thread::sleep(Duration::from_secs(wait_time));
            } else {
                let status = response.status();
                let error_text = response.text()?;
                bail!(
                    "Failed to fetch data from URL: {}. Status: {}. Error: {}",
                    url,
                    status,
                    error_text
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::Tier;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};

    // Nothing listens on the discard port in the test environment.
    const DEAD_URL: &str = "http://127.0.0.1:9/api";

    fn engine() -> AnalysisEngine {
        AnalysisEngine::seeded(&EngineConfig::default().with_latency_ms(0), 17)
    }

    fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    return;
                }
            }
        }
    }

    /// Serves one canned `(status, extra headers, body)` per connection.
    fn serve(responses: Vec<(&'static str, &'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for (status, headers, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else { return };
                read_request(&mut stream);
                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    headers,
                    body.len(),
                    body
                );
                let _ = stream.write_all(reply.as_bytes());
            }
        });

        format!("http://{}/api", addr)
    }

    #[test]
    fn unreachable_service_is_unhealthy() {
        let remote = RemoteAnalyzer::new(DEAD_URL).unwrap();
        assert!(!remote.check_health());
        assert!(remote.analyze(&AnalysisRequest::new("tau")).is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let remote = RemoteAnalyzer::new("http://localhost:5000/api/").unwrap();
        assert_eq!(remote.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn falls_back_when_unreachable() {
        let remote = RemoteAnalyzer::new(DEAD_URL).unwrap();
        let analysis = remote.analyze_with_fallback(&mut engine(), &AnalysisRequest::new("Tau"));

        let Analysis::LocalSimulated(result) = &analysis else {
            panic!("expected local result, got {:?}", analysis);
        };
        assert_eq!(result.tier, Tier::Disease);

        let doc = analysis.to_json().unwrap();
        assert_eq!(doc[PROVENANCE_KEY], "local-simulated");
        assert_eq!(doc["proteinId"], "Tau");
    }

    #[test]
    fn uses_remote_result_when_healthy() {
        let base = serve(vec![
            ("200 OK", "", r#"{"status":"healthy","model_loaded":false}"#),
            ("200 OK", "", r#"{"proteinId":"tau","misfoldingRisk":81}"#),
        ]);
        let remote = RemoteAnalyzer::new(&base).unwrap();
        let analysis = remote.analyze_with_fallback(&mut engine(), &AnalysisRequest::new("tau"));

        assert_eq!(analysis.provenance(), "remote");
        let doc = analysis.to_json().unwrap();
        assert_eq!(doc["misfoldingRisk"], 81);
        assert_eq!(doc[PROVENANCE_KEY], "remote");
    }

    #[test]
    fn unhealthy_status_falls_back() {
        let base = serve(vec![("200 OK", "", r#"{"status":"loading"}"#)]);
        let remote = RemoteAnalyzer::new(&base).unwrap();
        let analysis = remote.analyze_with_fallback(&mut engine(), &AnalysisRequest::new("whey"));
        assert_eq!(analysis.provenance(), "local-simulated");
    }

    #[test]
    fn server_error_falls_back() {
        let base = serve(vec![
            ("200 OK", "", r#"{"status":"healthy"}"#),
            ("500 Internal Server Error", "", r#"{"error":"boom"}"#),
        ]);
        let remote = RemoteAnalyzer::new(&base).unwrap();
        let analysis = remote.analyze_with_fallback(&mut engine(), &AnalysisRequest::new("prion"));
        assert_eq!(analysis.provenance(), "local-simulated");
    }

    #[test]
    fn retries_after_rate_limit() {
        let base = serve(vec![
            ("429 Too Many Requests", "Retry-After: 0\r\n", "{}"),
            ("200 OK", "", r#"{"proteinId":"sod1"}"#),
        ]);
        let remote = RemoteAnalyzer::new(&base).unwrap();
        let body = remote.analyze(&AnalysisRequest::new("sod1")).unwrap();
        assert_eq!(body["proteinId"], "sod1");
    }
}
