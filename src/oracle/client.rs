use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::engine::DocumentProfile;
use crate::oracle::types::{
    ChatMessage, ChatOptions, ChatRequest, ChatResponse, GenerateOptions, GenerateRequest,
    GenerateResponse, RecordAnalysis,
};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Oracle returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Malformed oracle response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Boundary-hint source for the segmentation engine. The HTTP client
/// implements it; tests substitute a scripted oracle.
pub trait BoundaryOracle {
    /// Candidate boundary phrases for one analysis window. Transient remote
    /// failures degrade to an empty list; they never propagate.
    fn boundary_candidates(&self, window_text: &str, profile: &DocumentProfile) -> Vec<String>;
}

/// One record's worth of input to a batch metadata request.
#[derive(Debug, Clone, Copy)]
pub struct BatchItem<'a> {
    pub id: i64,
    pub text: &'a str,
}

const BATCH_PROMPT_TEMPLATE: &str = "**Role:** You are a highly efficient content analyst. Your task is to analyze a BATCH of records and return structured metadata for EACH record.

**Instructions:**
1.  You will be provided with multiple records, each marked with a unique identifier (e.g., \"--- RECORD record_123 ---\").
2.  Analyze each record independently based on the JSON schema provided below.
3.  Your response MUST be a single, valid JSON object.
4.  The keys of this JSON object MUST be the exact record identifiers (e.g., \"record_123\").
5.  The value for each key MUST be the JSON analysis object for that record. Do not include any text or markdown outside of the main JSON object.

**JSON Schema for EACH Record's Analysis:**
{
  \"category\": \"Choose one of: 'Partnership Announcement', 'Product Feature/Guide', 'Customer Story/Case Study', 'General Marketing', 'Deep Technical Analysis'\",
  \"technical_depth\": \"Rate the technical depth on a scale of 1 to 5, where 1 = Marketing fluff and 5 = In-depth guide for engineers.\",
  \"keywords\": \"Provide an array of 3-5 relevant technical keywords or phrases from the record.\",
  \"summary\": \"Write a concise, one-sentence summary of the record's main point.\"
}

**Batch of Records to Analyze:**
{batch_text}";

/// Records with less trimmed text than this are not worth analyzing.
const MIN_ANALYZABLE_LEN: usize = 100;

/// Estimated token cost of the batch prompt's fixed instructions, charged
/// once per batch by the packer.
pub fn batch_prompt_overhead(chars_per_token: usize) -> usize {
    BATCH_PROMPT_TEMPLATE.len() / chars_per_token.max(1)
}

/// Blocking client for an Ollama-style `/api/generate` endpoint. Stateless
/// across calls beyond connection reuse; one request is in flight at a time.
pub struct OracleClient {
    http: Client,
    endpoint: String,
    model: String,
    max_retries: u32,
}

impl OracleClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(180)) // LLM generation is slow
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
            max_retries: 3,
        }
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// One outbound generate request; no retries at this level.
    fn generate(&self, prompt: String, json_format: bool) -> Result<String, OracleError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            format: json_format.then_some("json"),
            options: GenerateOptions { temperature: 0.3 },
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.endpoint))
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OracleError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json()?;
        Ok(parsed.response)
    }

    /// Retry wrapper: exponential backoff, doubling from one second per
    /// attempt. The caller is stalled during backoff, not the whole process.
    fn generate_with_retries(&self, prompt: &str, json_format: bool) -> Result<String, OracleError> {
        let mut attempt = 0;
        loop {
            match self.generate(prompt.to_string(), json_format) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.max_retries {
                        return Err(e);
                    }
                    eprintln!("[oracle] attempt {attempt} failed: {e}");
                    thread::sleep(Duration::from_secs(1 << (attempt - 1)));
                }
            }
        }
    }

    /// Batch metadata path: one request covering every record in the batch,
    /// expecting one JSON object keyed by record identifier. Returns `None`
    /// after exhausting retries (the batch is marked failed and skipped).
    pub fn analyze_batch(
        &self,
        items: &[BatchItem<'_>],
        max_record_len: usize,
    ) -> Option<HashMap<i64, RecordAnalysis>> {
        let (prompt, wrapped_ids) = build_batch_prompt(items, max_record_len);
        if wrapped_ids.is_empty() {
            return Some(HashMap::new());
        }

        let mut attempt = 0;
        loop {
            let outcome = self
                .generate(prompt.clone(), true)
                .and_then(|body| parse_batch_response(&body, &wrapped_ids));
            match outcome {
                Ok(results) => return Some(results),
                Err(e) => {
                    attempt += 1;
                    eprintln!("[oracle] batch attempt {attempt} failed: {e}");
                    if attempt >= self.max_retries {
                        return None;
                    }
                    thread::sleep(Duration::from_secs(1 << (attempt - 1)));
                }
            }
        }
    }
}

/// Whole-document summary source. The HTTP client implements it; tests
/// substitute a scripted summarizer.
pub trait SummaryOracle {
    fn summarize(&self, content: &str) -> Result<String, OracleError>;
}

const SUMMARY_SYSTEM_PROMPT: &str =
    "Provide a concise technical summary of this markdown document.";

/// Context window requested for whole-document summaries.
const SUMMARY_NUM_CTX: u32 = 32_768;

impl SummaryOracle for OracleClient {
    fn summarize(&self, content: &str) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SUMMARY_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Summarize this document:\n\n{content}"),
                },
            ],
            stream: false,
            options: ChatOptions {
                num_ctx: SUMMARY_NUM_CTX,
            },
        };

        let mut attempt = 0;
        loop {
            let outcome = (|| {
                let response = self
                    .http
                    .post(format!("{}/api/chat", self.endpoint))
                    .json(&request)
                    .send()?;

                let status = response.status();
                if !status.is_success() {
                    let body = response
                        .text()
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    return Err(OracleError::ServerError {
                        status: status.as_u16(),
                        body,
                    });
                }

                let parsed: ChatResponse = response.json()?;
                Ok(parsed.message.content)
            })();

            match outcome {
                Ok(summary) => return Ok(summary),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.max_retries {
                        return Err(e);
                    }
                    eprintln!("[oracle] summary attempt {attempt} failed: {e}");
                    thread::sleep(Duration::from_secs(1 << (attempt - 1)));
                }
            }
        }
    }
}

impl BoundaryOracle for OracleClient {
    fn boundary_candidates(&self, window_text: &str, profile: &DocumentProfile) -> Vec<String> {
        let prompt = profile.prompt_for(window_text);
        match self.generate_with_retries(&prompt, false) {
            Ok(body) => parse_candidate_lines(&body, profile.min_candidate_len),
            Err(e) => {
                // Degrade this window to "no candidates contributed".
                eprintln!("[oracle] window degraded after retries: {e}");
                Vec::new()
            }
        }
    }
}

/// Newline-delimited candidate phrases, filtered by minimum length.
pub fn parse_candidate_lines(body: &str, min_len: usize) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.len() > min_len)
        .map(str::to_string)
        .collect()
}

/// Wrap each eligible record in its unique delimiter and assemble the batch
/// prompt. Records below the analyzable minimum are skipped; texts are
/// truncated to `max_record_len` (on a char boundary).
pub fn build_batch_prompt(
    items: &[BatchItem<'_>],
    max_record_len: usize,
) -> (String, Vec<(i64, String)>) {
    let mut sections = Vec::new();
    let mut wrapped_ids = Vec::new();
    for item in items {
        if item.text.trim().len() < MIN_ANALYZABLE_LEN {
            continue;
        }
        let identifier = format!("record_{}", item.id);
        let truncated = truncate_on_char_boundary(item.text, max_record_len);
        sections.push(format!("--- RECORD {identifier} ---\n{truncated}\n"));
        wrapped_ids.push((item.id, identifier));
    }

    let prompt = BATCH_PROMPT_TEMPLATE.replace("{batch_text}", &sections.join("\n"));
    (prompt, wrapped_ids)
}

/// Decode the oracle's JSON object and map delimiter-derived identifiers back
/// to record ids. Identifiers the oracle omitted are simply absent from the
/// result.
pub fn parse_batch_response(
    body: &str,
    wrapped_ids: &[(i64, String)],
) -> Result<HashMap<i64, RecordAnalysis>, OracleError> {
    let mut keyed: HashMap<String, RecordAnalysis> = serde_json::from_str(body)?;
    let mut results = HashMap::new();
    for (id, identifier) in wrapped_ids {
        if let Some(analysis) = keyed.remove(identifier) {
            results.insert(*id, analysis);
        }
    }
    Ok(results)
}

fn truncate_on_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
