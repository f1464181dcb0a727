//! Realtime presence configuration.

use serde::{Deserialize, Serialize};

/// Realtime presence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Buffer size of each topic's broadcast channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Prefix prepended to the share identifier to form the topic name.
    #[serde(default = "default_topic_prefix")]
    pub topic_prefix: String,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            topic_prefix: default_topic_prefix(),
        }
    }
}

fn default_channel_buffer() -> usize {
    64
}

fn default_topic_prefix() -> String {
    "share-presence-".to_string()
}
