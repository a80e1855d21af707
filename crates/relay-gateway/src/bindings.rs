//! Route bindings
//!
//! A binding maps one inbound endpoint to one upstream call shape: which
//! upstream, which method and path, and how the inbound body becomes the
//! outbound body. Bindings are static; the upstream decides which credential
//! is injected and how.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use shared::{credentials, UpstreamConfig};

/// Header carrying the AssemblyAI key
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Header carrying the Claude key
pub const X_API_KEY_HEADER: &str = "x-api-key";

/// Protocol version header required by the Claude API
pub const ANTHROPIC_VERSION_HEADER: &str = "anthropic-version";

/// Inbound JSON field holding base64 audio for uploads
pub const AUDIO_BASE64_FIELD: &str = "audioBase64";

/// Headers whose values must never be logged
pub const SENSITIVE_HEADERS: &[&str] = &[AUTHORIZATION_HEADER, X_API_KEY_HEADER];

/// Third-party API a binding forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    AssemblyAi,
    Claude,
}

impl Upstream {
    /// Human-readable service name, used in error messages
    pub fn service_name(self) -> &'static str {
        match self {
            Upstream::AssemblyAi => "AssemblyAI",
            Upstream::Claude => "Claude",
        }
    }

    /// Key the credential is resolved under
    pub fn credential_key(self) -> &'static str {
        match self {
            Upstream::AssemblyAi => credentials::ASSEMBLYAI_API_KEY,
            Upstream::Claude => credentials::CLAUDE_API_KEY,
        }
    }

    pub fn base_url(self, config: &UpstreamConfig) -> &str {
        match self {
            Upstream::AssemblyAi => &config.assemblyai_base_url,
            Upstream::Claude => &config.claude_base_url,
        }
    }

    /// Authentication plus fixed protocol headers for this upstream
    pub fn headers(
        self,
        credential: &SecretString,
        config: &UpstreamConfig,
    ) -> Vec<(&'static str, String)> {
        match self {
            Upstream::AssemblyAi => vec![(
                AUTHORIZATION_HEADER,
                credential.expose_secret().to_string(),
            )],
            Upstream::Claude => vec![
                (X_API_KEY_HEADER, credential.expose_secret().to_string()),
                (ANTHROPIC_VERSION_HEADER, config.anthropic_version.clone()),
            ],
        }
    }
}

/// How the inbound body is turned into the outbound body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Decode the base64 string in `field` into raw bytes
    Base64Upload { field: &'static str },
    /// Relay the inbound JSON as the outbound JSON body
    Json,
    /// No outbound body
    Empty,
}

impl BodyMode {
    /// Content type sent with the outbound body, if any
    pub fn content_type(self) -> Option<&'static str> {
        match self {
            BodyMode::Base64Upload { .. } => Some("application/octet-stream"),
            BodyMode::Json => Some("application/json"),
            BodyMode::Empty => None,
        }
    }
}

/// Fixed mapping from one inbound endpoint to one upstream call
#[derive(Debug, Clone)]
pub struct RouteBinding {
    /// Name used in logs
    pub name: &'static str,
    pub upstream: Upstream,
    pub method: Method,
    /// Upstream path; `{param}` segments are filled from inbound path parameters
    pub path: &'static str,
    pub body: BodyMode,
}

/// `POST /api/assemblyai/upload` -> `POST /v2/upload`
pub static ASSEMBLYAI_UPLOAD: RouteBinding = RouteBinding {
    name: "assemblyai.upload",
    upstream: Upstream::AssemblyAi,
    method: Method::POST,
    path: "/v2/upload",
    body: BodyMode::Base64Upload {
        field: AUDIO_BASE64_FIELD,
    },
};

/// `POST /api/assemblyai/transcript` -> `POST /v2/transcript`
pub static ASSEMBLYAI_TRANSCRIPT_CREATE: RouteBinding = RouteBinding {
    name: "assemblyai.transcript.create",
    upstream: Upstream::AssemblyAi,
    method: Method::POST,
    path: "/v2/transcript",
    body: BodyMode::Json,
};

/// `GET /api/assemblyai/transcript/{id}` -> `GET /v2/transcript/{id}`
pub static ASSEMBLYAI_TRANSCRIPT_STATUS: RouteBinding = RouteBinding {
    name: "assemblyai.transcript.status",
    upstream: Upstream::AssemblyAi,
    method: Method::GET,
    path: "/v2/transcript/{id}",
    body: BodyMode::Empty,
};

/// `POST /api/claude/messages` -> `POST /v1/messages`
pub static CLAUDE_MESSAGES: RouteBinding = RouteBinding {
    name: "claude.messages",
    upstream: Upstream::Claude,
    method: Method::POST,
    path: "/v1/messages",
    body: BodyMode::Json,
};

/// All forwarding bindings
pub static ALL: [&RouteBinding; 4] = [
    &ASSEMBLYAI_UPLOAD,
    &ASSEMBLYAI_TRANSCRIPT_CREATE,
    &ASSEMBLYAI_TRANSCRIPT_STATUS,
    &CLAUDE_MESSAGES,
];

impl RouteBinding {
    /// Build the outbound URL, substituting `{name}` segments from `params`.
    ///
    /// Values are percent-encoded as a single path segment, which leaves
    /// alphanumeric and hyphenated identifiers unchanged.
    pub fn url(&self, config: &UpstreamConfig, params: &[(String, String)]) -> String {
        let mut path = self.path.to_string();
        for (name, value) in params {
            let placeholder = format!("{{{}}}", name);
            path = path.replace(&placeholder, &urlencoding::encode(value));
        }
        format!("{}{}", self.upstream.base_url(config), path)
    }
}
