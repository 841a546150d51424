use crate::gemini::{AnalysisPayload, GenerateContentRequest, GenerateContentResponse};
use crate::{Analysis, GameState};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const MAX_TIPS: usize = 3;

/// Gemini client that turns a game snapshot into match commentary.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("quantum-domino/0.1 (terminal scorekeeper)")
                .build()
                .unwrap_or_default(),
            api_key: None,
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    MissingCredential,
    Network(reqwest::Error, String),
    Api(StatusCode, String),
    Parsing(String),
    /// No text part came back; carries the model's finish reason when given.
    EmptyResponse(Option<String>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingCredential => write!(f, "No API key configured (set GEMINI_API_KEY)"),
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(status, body) => write!(f, "API error {status}: {body}"),
            ApiError::Parsing(msg) => write!(f, "Parse error: {msg}"),
            ApiError::EmptyResponse(Some(reason)) => {
                write!(f, "Model returned no content (finish reason {reason})")
            }
            ApiError::EmptyResponse(None) => write!(f, "Model returned no content"),
        }
    }
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Build a client from the process environment.
    ///
    /// `GEMINI_API_KEY` (or `API_KEY`) carries the credential; its absence is
    /// not an error here, `analyze` reports it instead.
    /// `QDOMINO_MODEL` and `QDOMINO_API_URL` override the model and endpoint.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut client = Self::new(non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY")));
        if let Some(model) = non_blank("QDOMINO_MODEL") {
            client = client.with_model(model);
        }
        if let Some(url) = non_blank("QDOMINO_API_URL") {
            client = client.with_base_url(url);
        }
        client
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a summary, a prediction and tactical tips.
    pub async fn analyze(&self, state: &GameState) -> ApiResult<Analysis> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ApiError::MissingCredential);
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest::structured(build_prompt(state));

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(status, text));
        }

        let raw: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(format!("{url}: {e}")))?;
        let text = raw
            .first_text()
            .ok_or_else(|| ApiError::EmptyResponse(raw.finish_reason().map(str::to_string)))?;
        parse_analysis(text)
    }
}

/// Prompt describing the match: names, totals, target, and the round history
/// in stored (newest-first) order.
pub fn build_prompt(state: &GameState) -> String {
    let totals = state.totals();
    let history = state
        .rounds
        .iter()
        .map(|r| format!("{}-{}", r.points_a, r.points_b))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze this futuristic domino match:
Team A ({}): {} points.
Team B ({}): {} points.
Target score to win: {}.
History of rounds (A vs B): {}.

Provide a strategic summary, a prediction of who will win based on the momentum, and 3 futuristic tactical tips for the losing team.",
        state.team_a_name, totals.a, state.team_b_name, totals.b, state.winning_score, history
    )
}

fn parse_analysis(text: &str) -> ApiResult<Analysis> {
    let payload: AnalysisPayload =
        serde_json::from_str(text.trim()).map_err(|e| ApiError::Parsing(e.to_string()))?;
    if payload.tips.is_empty() {
        return Err(ApiError::Parsing("analysis has no tips".into()));
    }
    Ok(Analysis {
        summary: payload.summary,
        prediction: payload.prediction,
        tips: payload.tips.into_iter().take(MAX_TIPS).collect(),
    })
}
