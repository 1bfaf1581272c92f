use serde::{Deserialize, Serialize};

/// Configuration for the events module, read from `modules.events`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    /// Maximum number of events returned by the list endpoint.
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

fn default_list_limit() -> u64 {
    100
}
