//! Identity resolution for the acting voter.
//!
//! The poll core trusts whatever identity it is handed. Where that identity
//! comes from is decided here, through a chain of providers:
//!
//! 1. `--as <id>` / `--name <name>`: explicit per-session override
//! 2. `LUNCHPOLL_HOST_USER`: user JSON handed over by the hosting chat shell
//! 3. `LUNCHPOLL_VOTER_ID` / `LUNCHPOLL_VOTER_NAME`: process-level identity
//! 4. `[identity]` in the config file
//! 5. A fixed placeholder, so the poll works outside any host
//!
//! The first provider that yields an identity wins.

use std::env;

use serde::Deserialize;
use tracing::debug;

use crate::config::IdentitySection;
use crate::model::VoterIdentity;

pub const HOST_USER_VAR: &str = "LUNCHPOLL_HOST_USER";
pub const VOTER_ID_VAR: &str = "LUNCHPOLL_VOTER_ID";
pub const VOTER_NAME_VAR: &str = "LUNCHPOLL_VOTER_NAME";

pub const FALLBACK_ID: &str = "test_user_1";
pub const FALLBACK_NAME: &str = "Test User";

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("LUNCHPOLL_HOST_USER is not a valid host user: {0}")]
    MalformedHostUser(#[from] serde_json::Error),
}

/// A source that may know who is acting.
pub trait IdentityProvider {
    /// A short label for logs.
    fn source(&self) -> &'static str;

    /// The identity, or `None` when this source has nothing to say.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the source has data it cannot parse.
    fn identity(&self) -> Result<Option<VoterIdentity>, IdentityError>;
}

/// Identity given on the command line.
pub struct Explicit<'a> {
    pub id: Option<&'a str>,
    pub name: Option<&'a str>,
}

impl IdentityProvider for Explicit<'_> {
    fn source(&self) -> &'static str {
        "command line"
    }

    fn identity(&self) -> Result<Option<VoterIdentity>, IdentityError> {
        Ok(self
            .id
            .filter(|id| !id.is_empty())
            .map(|id| named(id, self.name)))
    }
}

/// Identity supplied by a hosting chat shell.
///
/// The shell passes its session user as JSON, e.g.
/// `{"id": 42, "first_name": "Dana", "last_name": "Reyes"}`.
pub struct HostSession {
    payload: Option<String>,
}

/// User payload shape handed over by the host shell.
#[derive(Deserialize)]
struct HostUser {
    id: serde_json::Value,
    first_name: String,
    last_name: Option<String>,
}

impl HostSession {
    /// Reads the payload from [`HOST_USER_VAR`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env::var(HOST_USER_VAR).ok())
    }

    #[must_use]
    pub fn new(payload: Option<String>) -> Self {
        Self { payload }
    }
}

impl IdentityProvider for HostSession {
    fn source(&self) -> &'static str {
        "host session"
    }

    fn identity(&self) -> Result<Option<VoterIdentity>, IdentityError> {
        let Some(payload) = self.payload.as_deref().filter(|p| !p.trim().is_empty()) else {
            return Ok(None);
        };

        let user: HostUser = serde_json::from_str(payload)?;
        let id = match user.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let name = [Some(user.first_name), user.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Some(VoterIdentity::new(id, name)))
    }
}

/// Identity from [`VOTER_ID_VAR`] and [`VOTER_NAME_VAR`].
pub struct Environment {
    id: Option<String>,
    name: Option<String>,
}

impl Environment {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            id: env::var(VOTER_ID_VAR).ok(),
            name: env::var(VOTER_NAME_VAR).ok(),
        }
    }
}

impl IdentityProvider for Environment {
    fn source(&self) -> &'static str {
        "environment"
    }

    fn identity(&self) -> Result<Option<VoterIdentity>, IdentityError> {
        Ok(self
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| named(id, self.name.as_deref())))
    }
}

/// Identity from the config file's `[identity]` section.
pub struct Configured<'a>(pub &'a IdentitySection);

impl IdentityProvider for Configured<'_> {
    fn source(&self) -> &'static str {
        "config"
    }

    fn identity(&self) -> Result<Option<VoterIdentity>, IdentityError> {
        Ok(self
            .0
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| named(id, self.0.name.as_deref())))
    }
}

/// The placeholder identity used when nothing else applies.
#[must_use]
pub fn fallback() -> VoterIdentity {
    VoterIdentity::new(FALLBACK_ID, FALLBACK_NAME)
}

/// Walk the providers in order and return the first identity found,
/// or [`fallback`] when none has one.
///
/// # Errors
///
/// Stops at the first provider that fails and returns its error.
pub fn resolve_identity(
    providers: &[&dyn IdentityProvider],
) -> Result<VoterIdentity, IdentityError> {
    for provider in providers {
        if let Some(identity) = provider.identity()? {
            debug!(source = provider.source(), voter = %identity.id, "resolved identity");
            return Ok(identity);
        }
    }
    debug!(
        voter = FALLBACK_ID,
        "no identity source matched, using placeholder"
    );
    Ok(fallback())
}

/// Name defaults to the id when absent or blank.
fn named(id: &str, name: Option<&str>) -> VoterIdentity {
    let name = name.filter(|n| !n.trim().is_empty()).unwrap_or(id);
    VoterIdentity::new(id, name)
}
