use crate::{
    error::{Error, Result},
    labels,
};
use serde::Deserialize;
use std::time::Duration;

/// Endpoint root used when neither the configuration nor a request names one.
pub const DEFAULT_PDP: &str = "http://localhost:17779";
/// Path joined to the endpoint root when a request has none.
pub const DEFAULT_PATH: &str = "/$";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfiguration {
    pdp: String,
    default_path: String,
    version: Option<String>,
    timeout: Duration,
    user_agent: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct ConfigurationDocument {
    pdp: Option<String>,
    default_path: Option<String>,
    version: Option<String>,
    timeout: Option<u64>,
    user_agent: Option<String>,
}

impl InvokerConfiguration {
    pub fn new() -> Self {
        Self {
            pdp: String::from(DEFAULT_PDP),
            default_path: String::from(DEFAULT_PATH),
            version: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }

    /// Reads a configuration document, e.g.
    ///
    /// ```yaml
    /// pdp: http://localhost:8080
    /// version: v1.0
    /// timeout: 5
    /// ```
    ///
    /// Every field is optional; `timeout` is given in seconds.
    pub fn from_yaml_str<S: AsRef<str>>(document: S) -> Result<Self> {
        let document: ConfigurationDocument =
            serde_yaml::from_str(document.as_ref()).map_err(Error::InvalidConfiguration)?;
        let mut configuration = Self::new();

        if let Some(pdp) = document.pdp {
            configuration.set_pdp(pdp);
        }
        if let Some(default_path) = document.default_path {
            configuration.set_default_path(default_path);
        }
        if let Some(version) = document.version {
            configuration.set_version(version);
        }
        if let Some(timeout) = document.timeout {
            configuration.set_timeout(Duration::from_secs(timeout));
        }
        if let Some(user_agent) = document.user_agent {
            configuration.set_user_agent(user_agent);
        }

        Ok(configuration)
    }

    /// An empty endpoint root resets it to [`DEFAULT_PDP`].
    pub fn set_pdp<S: Into<String>>(&mut self, pdp: S) {
        let pdp = pdp.into();
        self.pdp = if pdp.is_empty() {
            String::from(DEFAULT_PDP)
        } else {
            pdp
        };
    }

    pub fn pdp(&self) -> &str {
        &self.pdp
    }

    pub fn set_default_path<S: Into<String>>(&mut self, default_path: S) {
        let default_path = default_path.into();
        self.default_path = if default_path.is_empty() {
            String::from(DEFAULT_PATH)
        } else {
            default_path
        };
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// The label is copied into generated test cases as given. An empty label clears it.
    pub fn set_version<S: Into<String>>(&mut self, version: S) {
        let version = version.into();
        self.version = if version.is_empty() {
            None
        } else {
            Some(version)
        };
    }

    /// Like [`set_version`](Self::set_version), after stripping the `v` prefix of a
    /// dotted version label.
    pub fn set_standardized_version<S: AsRef<str>>(&mut self, version: S) -> Result<()> {
        self.version = Some(labels::standardize_version(version)?);
        Ok(())
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_user_agent<S: Into<String>>(&mut self, user_agent: S) {
        self.user_agent = user_agent.into();
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for InvokerConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
