use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, HostConfig};

/// Runtime environment the host is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: verbose errors, relaxed transport rules
    Development,
    /// Deployed operation
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                field: "environment",
                value: s.to_string(),
            }),
        }
    }
}

/// One mapped route: a path label paired with the handler name that claims
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub handler: String,
}

/// Accumulates named services during the registration phase, then builds
/// the [`Host`].
#[derive(Debug, Default)]
pub struct HostBuilder {
    /// Registered service names, in registration order
    services: Vec<String>,
}

impl HostBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named service. Adding the same name twice is a no-op.
    pub fn add_service(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.services.contains(&name) {
            self.services.push(name);
        }
        self
    }

    /// Whether the named service has been registered
    pub fn has_service(&self, name: &str) -> bool {
        self.services.iter().any(|service| service == name)
    }

    /// Registered service names in registration order
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Consume the builder and produce a host configured for `config`'s
    /// environment, with no middleware, routes, or styles yet.
    pub fn build(self, config: HostConfig) -> Host {
        Host {
            environment: config.environment,
            services: self.services,
            middleware: Vec::new(),
            routes: Vec::new(),
            styles: HashMap::new(),
            config,
        }
    }
}

/// The configured host: an inert record of everything the extension
/// pipeline contributed.
///
/// Middleware keeps installation order. Routes and style keys are
/// first-writer-wins: because phases broadcast in ascending priority
/// order, the highest-priority extension to claim a path or style key
/// keeps it.
#[derive(Debug)]
pub struct Host {
    environment: Environment,
    config: HostConfig,
    services: Vec<String>,
    middleware: Vec<String>,
    routes: Vec<Route>,
    styles: HashMap<String, String>,
}

impl Host {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Service names carried over from the builder
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Middleware labels in installation order
    pub fn middleware(&self) -> &[String] {
        &self.middleware
    }

    /// Mapped routes in claim order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Install a middleware label. Installing the same label twice is a
    /// no-op; order of first installation is preserved.
    pub fn install_middleware(&mut self, label: impl Into<String>) -> &mut Self {
        let label = label.into();
        if !self.middleware.contains(&label) {
            self.middleware.push(label);
        }
        self
    }

    /// Whether the middleware label has been installed
    pub fn has_middleware(&self, label: &str) -> bool {
        self.middleware.iter().any(|entry| entry == label)
    }

    /// Map a path to a handler name. The first claim on a path wins.
    pub fn map_route(&mut self, path: impl Into<String>, handler: impl Into<String>) -> &mut Self {
        let path = path.into();
        if self.route_handler(&path).is_none() {
            self.routes.push(Route {
                path,
                handler: handler.into(),
            });
        }
        self
    }

    /// Handler name for a mapped path, if any
    pub fn route_handler(&self, path: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.handler.as_str())
    }

    /// Set a style entry. The first writer of a key wins.
    pub fn set_style(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.styles.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Style value for a key, if any
    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(|value| value.as_str())
    }

    /// Copy configured style defaults into any keys no theme claimed.
    pub fn apply_style_defaults(&mut self) -> &mut Self {
        let Host { config, styles, .. } = self;
        for (key, value) in &config.styles {
            styles
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Snapshot of the host for display and serialization
    pub fn summary(&self) -> HostSummary {
        HostSummary {
            name: self.config.name.clone(),
            environment: self.environment,
            listen: self.config.listen.clone(),
            services: self.services.clone(),
            middleware: self.middleware.clone(),
            routes: self.routes.clone(),
            styles: self
                .styles
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

/// Serializable snapshot of a configured [`Host`].
#[derive(Debug, Serialize)]
pub struct HostSummary {
    pub name: String,
    pub environment: Environment,
    pub listen: String,
    pub services: Vec<String>,
    pub middleware: Vec<String>,
    pub routes: Vec<Route>,
    /// Sorted so serialized output is stable
    pub styles: BTreeMap<String, String>,
}
