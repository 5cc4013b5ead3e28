use thiserror::Error;

/// Errors returned by the research gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key is configured. Checked before every call; nothing is sent.
    #[error("GEMINI_API_KEY environment variable not set; configure an API key to run research")]
    MissingApiKey,

    /// The request was rejected locally before any call was made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid Gemini base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The underlying `reqwest::Client` could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network or TLS failure while talking to Gemini.
    #[error("failed to fetch {context} from Gemini API: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Gemini answered with a non-2xx status.
    #[error("Gemini API returned HTTP {status} for {context}: {message}")]
    Api {
        context: &'static str,
        status: u16,
        message: String,
    },

    /// The response body was not a `generateContent` envelope.
    #[error("unexpected Gemini response envelope for {context}: {source}")]
    Envelope {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The model text did not match the requested JSON shape.
    #[error("failed to parse {context} response: {source}")]
    Parse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
