use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Portal API location and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Absolute base URL every path below is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_activity_path")]
    pub activity_path: String,
    #[serde(default = "default_csrf_path")]
    pub csrf_path: String,
    #[serde(default = "default_terms_path")]
    pub terms_path: String,
    #[serde(default = "default_address_fields_path")]
    pub address_fields_path: String,
    #[serde(default = "default_agreement_registration_path")]
    pub agreement_registration_path: String,
    #[serde(default = "default_agreement_validation_path")]
    pub agreement_validation_path: String,
    /// Header carrying the security token on mutating requests.
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Analytics reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Action kinds reported after they are reduced.
    #[serde(default = "default_tracked_kinds")]
    pub tracked_kinds: Vec<String>,
    /// When set, events are POSTed here instead of only being logged.
    #[serde(default)]
    pub beacon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3004".to_string()
}

fn default_activity_path() -> String {
    "/api/v1/supportaccount/activity/history".to_string()
}

fn default_csrf_path() -> String {
    "/api/v1/supportaccount/csrfToken".to_string()
}

fn default_terms_path() -> String {
    "/api/v1/supportaccount/cds/termsAndConditions".to_string()
}

fn default_address_fields_path() -> String {
    "/api/v1/supportaccount/addressForm".to_string()
}

fn default_agreement_registration_path() -> String {
    "/api/v1/supportaccount/agreements/enroll".to_string()
}

fn default_agreement_validation_path() -> String {
    "/api/v1/supportaccount/agreements/enroll/validate".to_string()
}

fn default_csrf_header() -> String {
    "X-Apple-CSRF-Token".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_tracked_kinds() -> Vec<String> {
    [
        "RECEIVE_ACTIVITIES",
        "SEE_MORE_ACTIVITY",
        "SHOW_ERROR_MODAL",
        "SHIPPING_LABEL_PAGE_VIEWED",
        "ACTIVITY_PAGE_VIEWED",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            activity_path: default_activity_path(),
            csrf_path: default_csrf_path(),
            terms_path: default_terms_path(),
            address_fields_path: default_address_fields_path(),
            agreement_registration_path: default_agreement_registration_path(),
            agreement_validation_path: default_agreement_validation_path(),
            csrf_header: default_csrf_header(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tracked_kinds: default_tracked_kinds(),
            beacon_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
