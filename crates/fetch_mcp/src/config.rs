use crate::models::Identity;

pub const DEFAULT_USER_AGENT_AUTONOMOUS: &str =
    "ModelContextProtocol/1.0 (Autonomous; +https://github.com/modelcontextprotocol/servers)";
pub const DEFAULT_USER_AGENT_MANUAL: &str =
    "ModelContextProtocol/1.0 (User-Specified; +https://github.com/modelcontextprotocol/servers)";

/// Identity and proxy policy for outbound requests.
///
/// Built once at startup and never mutated afterwards; shared by reference
/// into every fetch, so concurrent tool calls need no synchronization.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    user_agent_autonomous: String,
    user_agent_manual: String,
    proxy_url: Option<String>,
}

impl FetchConfig {
    /// A custom user agent, when given, replaces both identity defaults.
    pub fn new(custom_user_agent: Option<String>, proxy_url: Option<String>) -> Self {
        Self {
            user_agent_autonomous: custom_user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT_AUTONOMOUS.to_string()),
            user_agent_manual: custom_user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT_MANUAL.to_string()),
            proxy_url,
        }
    }

    pub fn user_agent(&self, identity: Identity) -> &str {
        match identity {
            Identity::Autonomous => &self.user_agent_autonomous,
            Identity::Manual => &self.user_agent_manual,
        }
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}
