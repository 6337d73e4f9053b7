use std::fmt::Display;

/// 30 seconds at 60 ticks per second.
pub const DEFAULT_RESPONSE_TIMEOUT_TICKS: u32 = 1800;

pub const DEFAULT_REMOTE_PORT: u16 = 80;

/// Where the remote participant's decisions come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemoteEndpoint {
    pub host: String,
    pub port: u16,
}

impl Default for RemoteEndpoint {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_REMOTE_PORT,
        }
    }
}

impl Display for RemoteEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl RemoteEndpoint {
    pub fn new<S: Into<String>>(host: S, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    pub remote: RemoteEndpoint,
    /// Ticks a choice handler waits for the remote participant before deciding on its own.
    pub response_timeout_ticks: u32,
    /// Forward switch-ins, faints, HP changes and the battle outcome to the remote participant.
    pub forward_notices: bool,
    pub enable_log: bool,
    /// Seed for the fallback decision RNG.
    pub fallback_seed: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            remote: RemoteEndpoint::default(),
            response_timeout_ticks: DEFAULT_RESPONSE_TIMEOUT_TICKS,
            forward_notices: true,
            enable_log: false,
            fallback_seed: 0,
        }
    }
}

impl ControllerConfig {
    pub fn with_remote<S: Into<String>>(self, host: S, port: u16) -> Self {
        Self {
            remote: RemoteEndpoint::new(host, port),
            ..self
        }
    }

    pub fn with_response_timeout(self, response_timeout_ticks: u32) -> Self {
        Self {
            response_timeout_ticks,
            ..self
        }
    }

    pub fn with_forward_notices(self, forward_notices: bool) -> Self {
        Self {
            forward_notices,
            ..self
        }
    }

    pub fn with_enable_log(self, enable_log: bool) -> Self {
        Self { enable_log, ..self }
    }

    pub fn with_fallback_seed(self, fallback_seed: u64) -> Self {
        Self { fallback_seed, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!("127.0.0.1:80", config.remote.to_string());
        assert_eq!(1800, config.response_timeout_ticks);
        assert!(config.forward_notices);
        assert!(!config.enable_log);
    }

    #[test]
    fn test_builder() {
        let config = ControllerConfig::default()
            .with_remote("battle.example", 9000)
            .with_response_timeout(5)
            .with_forward_notices(false)
            .with_enable_log(true)
            .with_fallback_seed(42);
        assert_eq!(RemoteEndpoint::new("battle.example", 9000), config.remote);
        assert_eq!(5, config.response_timeout_ticks);
        assert!(!config.forward_notices);
        assert!(config.enable_log);
        assert_eq!(42, config.fallback_seed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{ "remote": { "port": 8080 }, "response_timeout_ticks": 90 }"#).unwrap();
        assert_eq!(RemoteEndpoint::new("127.0.0.1", 8080), config.remote);
        assert_eq!(90, config.response_timeout_ticks);
        assert!(config.forward_notices);
    }
}
