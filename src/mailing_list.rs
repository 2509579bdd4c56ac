use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "ssr")]
use crate::config::{MailingListConfig, SITE_CONFIG};

/// Postgres unique-violation code, returned when the address is already stored.
pub const DUPLICATE_CODE: &str = "23505";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignupError {
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("This email is already subscribed!")]
    AlreadySubscribed,
    #[error("The mailing list is not configured")]
    NotConfigured,
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscribeOutcome {
    Subscribed,
    Rejected(SignupError),
}

#[derive(Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Maps a failed insert response onto a [`SignupError`].
pub fn classify_failure(status: u16, body: &str) -> SignupError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) if err.code.as_deref() == Some(DUPLICATE_CODE) => SignupError::AlreadySubscribed,
        Ok(PostgrestError {
            message: Some(message),
            ..
        }) if !message.is_empty() => SignupError::Backend(message),
        _ if status == 409 => SignupError::AlreadySubscribed,
        _ => SignupError::Backend(format!("Something went wrong ({status}). Please try again.")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupStage {
    #[default]
    Collapsed,
    Editing,
    Submitting,
    Failed,
    Subscribed,
}

/// State behind the signup widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    stage: SignupStage,
    message: Option<String>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SignupStage {
        self.stage
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn expand(&mut self) {
        if self.stage == SignupStage::Collapsed {
            self.stage = SignupStage::Editing;
        }
    }

    /// Returns the address to send, or `None` when nothing should be sent.
    pub fn submit(&mut self, email: &str) -> Option<String> {
        if !self.is_editable() {
            return None;
        }
        if !validate_email(email) {
            self.stage = SignupStage::Editing;
            self.message = Some(SignupError::InvalidEmail.to_string());
            return None;
        }
        self.stage = SignupStage::Submitting;
        self.message = None;
        Some(email.trim().to_string())
    }

    /// Applies the server response. `Err` carries a transport failure.
    pub fn resolve(&mut self, result: Result<SubscribeOutcome, String>) {
        if self.stage != SignupStage::Submitting {
            return;
        }
        match result {
            Ok(SubscribeOutcome::Subscribed) => {
                self.stage = SignupStage::Subscribed;
                self.message = None;
            }
            Ok(SubscribeOutcome::Rejected(err)) => {
                self.stage = SignupStage::Failed;
                self.message = Some(err.to_string());
            }
            Err(err) => {
                self.stage = SignupStage::Failed;
                self.message = Some(err);
            }
        }
    }

    /// Typing after a failure goes back to editing.
    pub fn edit(&mut self) {
        if self.stage == SignupStage::Failed {
            self.stage = SignupStage::Editing;
        }
    }

    pub fn retry(&mut self) {
        if self.stage == SignupStage::Failed {
            self.stage = SignupStage::Editing;
            self.message = None;
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self.stage, SignupStage::Submitting | SignupStage::Subscribed)
    }

    pub fn shows_form(&self) -> bool {
        matches!(
            self.stage,
            SignupStage::Editing | SignupStage::Submitting | SignupStage::Failed
        )
    }
}

#[cfg(feature = "ssr")]
pub static MAILING_LIST: LazyLock<Option<MailingList>> = LazyLock::new(|| {
    SITE_CONFIG
        .mailing_list
        .clone()
        .map(MailingList::new)
});

/// Inserts addresses into the `emails` table over PostgREST.
#[cfg(feature = "ssr")]
#[derive(Clone)]
pub struct MailingList {
    client: reqwest::Client,
    config: MailingListConfig,
}

#[cfg(feature = "ssr")]
impl MailingList {
    pub fn new(config: MailingListConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn subscribe(&self, email: &str) -> Result<(), SignupError> {
        let response = self
            .client
            .post(format!("{}/rest/v1/emails", self.config.url))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .header("Prefer", "return=minimal")
            .json(&[serde_json::json!({ "email": email })])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "mailing list request failed");
                SignupError::Backend("Something went wrong. Please try again.".to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("new mailing list signup");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        let err = classify_failure(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "mailing list insert rejected");
        Err(err)
    }
}
