use std::str::FromStr;

/// Which repository backend to construct at startup.
///
/// Only the in-memory reference backend exists in this repo; the variant
/// is still selected by configuration so a persistent backend can be added
/// behind the same repository traits without touching any caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend {other:?}")),
        }
    }
}

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HMAC secret for signing session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// Allow-list of the two parent identities, comma-separated.
    /// Env var: `PARENT_EMAILS` (e.g. "a@x,b@x").
    pub parent_emails: Vec<String>,
    /// Initial password seeded for both parents. Env var: `SEED_PASSWORD`.
    pub seed_password: String,
    /// Stable slug of the baby this deployment is scoped to
    /// (default "laura"). Env var: `BABY_SLUG`.
    pub baby_slug: String,
    /// Display name of the baby (default "Laura"). Env var: `BABY_NAME`.
    pub baby_name: String,
    /// Repository backend selection (default "memory"). Env var: `STORAGE_BACKEND`.
    pub backend: BackendKind,
    /// TCP port for the HTTP server (default 3000). Env var: `API_PORT`.
    pub api_port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let parent_emails = parse_parent_emails(
            &std::env::var("PARENT_EMAILS").expect("PARENT_EMAILS"),
        )
        .expect("PARENT_EMAILS must list exactly two identities");
        Self {
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            parent_emails,
            seed_password: std::env::var("SEED_PASSWORD").expect("SEED_PASSWORD"),
            baby_slug: std::env::var("BABY_SLUG").unwrap_or_else(|_| "laura".to_owned()),
            baby_name: std::env::var("BABY_NAME").unwrap_or_else(|_| "Laura".to_owned()),
            backend: std::env::var("STORAGE_BACKEND")
                .unwrap_or_else(|_| "memory".to_owned())
                .parse()
                .expect("STORAGE_BACKEND"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

fn parse_parent_emails(raw: &str) -> Result<Vec<String>, String> {
    let emails: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if emails.len() != 2 {
        return Err(format!("expected two parent emails, got {}", emails.len()));
    }
    Ok(emails)
}
