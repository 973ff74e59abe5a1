//! Service configuration types.
//!
//! `ServiceConfig` represents the top-level `config.toml`. Every section and
//! field has a default so a missing or partial file still yields a usable
//! configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the memory service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub memory: MemoryServiceConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    40443
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Relational storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection string. When unset, a database file named after
    /// `database` is created in the data directory.
    #[serde(default)]
    pub connection_string: Option<String>,
    /// Logical database name.
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_chat_session_table")]
    pub chat_session_table: String,
    #[serde(default = "default_chat_participant_table")]
    pub chat_participant_table: String,
}

fn default_database() -> String {
    "copilotchat".to_string()
}

fn default_chat_session_table() -> String {
    "chatsessions".to_string()
}

fn default_chat_participant_table() -> String {
    "chatparticipants".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            database: default_database(),
            chat_session_table: default_chat_session_table(),
            chat_participant_table: default_chat_participant_table(),
        }
    }
}

/// Semantic memory service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryServiceConfig {
    /// Base URL of the memory service.
    #[serde(default = "default_memory_endpoint")]
    pub endpoint: String,
    /// Optional API key sent in the `Authorization` header.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Index holding chat memories.
    #[serde(default = "default_index_name")]
    pub index_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_memory_endpoint() -> String {
    "http://127.0.0.1:9001".to_string()
}

fn default_index_name() -> String {
    "copilotchat".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for MemoryServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_memory_endpoint(),
            api_key: None,
            index_name: default_index_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Prompt settings. Only the memory map is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Allowed memory category names mapped to their extraction prompt.
    #[serde(default = "default_memory_map")]
    pub memory_map: BTreeMap<String, String>,
}

fn default_memory_map() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "LongTermMemory".to_string(),
            "Extract information that is encoded and consolidated from other memory types, \
             such as working memory or sensory memory. It should be useful for maintaining \
             and recalling one's personal identity, history, and knowledge over time."
                .to_string(),
        ),
        (
            "WorkingMemory".to_string(),
            "Extract information for a short period of time, such as a few seconds or \
             minutes. It should be useful for performing complex cognitive tasks that \
             require attention, concentration, or mental calculation."
                .to_string(),
        ),
    ])
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            memory_map: default_memory_map(),
        }
    }
}

/// Request authorization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require the caller to be a participant of the requested chat.
    #[serde(default)]
    pub require_chat_participant: bool,
    /// Header carrying the authenticated user id.
    #[serde(default = "default_user_id_header")]
    pub user_id_header: String,
}

fn default_user_id_header() -> String {
    "x-user-id".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_chat_participant: false,
            user_id_header: default_user_id_header(),
        }
    }
}
