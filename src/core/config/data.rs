use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{
    DEFAULT_ASSISTANT_NAME, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Generation model id (e.g., "gemini-1.5-flash-latest")
    pub model: Option<String>,
    /// API base URL up to and including the version segment
    pub base_url: Option<String>,
    /// Name the avatar introduces itself with
    pub assistant_name: Option<String>,
    /// Instruction sent with every request to set the assistant's tone
    pub system_prompt: Option<String>,
}

/// Keys accepted by `lucent set` / `lucent unset`.
pub const CONFIG_KEYS: [&str; 4] = ["model", "base-url", "assistant-name", "system-prompt"];

impl Config {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn assistant_name(&self) -> &str {
        self.assistant_name
            .as_deref()
            .unwrap_or(DEFAULT_ASSISTANT_NAME)
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "model" => Some(&mut self.model),
            "base-url" => Some(&mut self.base_url),
            "assistant-name" => Some(&mut self.assistant_name),
            "system-prompt" => Some(&mut self.system_prompt),
            _ => None,
        }
    }

    /// Set a value by its CLI key. Returns `false` for unknown keys.
    pub fn set_value(&mut self, key: &str, value: String) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// Clear a value by its CLI key. Returns `false` for unknown keys.
    pub fn unset_value(&mut self, key: &str) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        let entries = [
            ("model", &self.model, DEFAULT_MODEL),
            ("base-url", &self.base_url, DEFAULT_BASE_URL),
            ("assistant-name", &self.assistant_name, DEFAULT_ASSISTANT_NAME),
            ("system-prompt", &self.system_prompt, DEFAULT_SYSTEM_PROMPT),
        ];
        for (key, value, default) in entries {
            match value {
                Some(value) => println!("  {key}: {value}"),
                None => println!("  {key}: {default} (default)"),
            }
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.local/share/lucent` → `~/.local/share/lucent`
/// - macOS: `/Users/user/Library/Application Support/...` → `~/Library/Application Support/...`
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
