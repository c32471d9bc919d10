//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::{Config, DEFAULT_MODEL, SUGGESTED_MODELS};
use crate::core::credentials::{CredentialStore, GEMINI_API_KEY_ENV};
use crate::error::{GemcommitError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    match key {
        ConfigKey::ApiKey => {
            CredentialStore::store_gemini_key(&value)?;
            println!("Gemini API key has been stored securely.");
            Ok(())
        }
        ConfigKey::Model => update_config(|config| {
            config.set_model(&value)?;
            println!("Gemini model set to: {}", config.model);
            Ok(())
        }),
        ConfigKey::CustomPrompt => update_config(|config| {
            config.custom_prompt = value;
            println!("Custom prompt has been set.");
            Ok(())
        }),
        ConfigKey::PromptBeforeInsert => update_config(|config| {
            config.prompt_before_insert = parse_bool(&value)?;
            println!("Prompt before insert: {}", config.prompt_before_insert);
            Ok(())
        }),
    }
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    match key {
        ConfigKey::ApiKey => {
            if let Some(key) = CredentialStore::get_gemini_key()? {
                let source = if CredentialStore::key_from_env() {
                    format!(" (from {})", GEMINI_API_KEY_ENV)
                } else {
                    String::new()
                };
                println!("Gemini API key: {}{}", CredentialStore::mask_token(&key), source);
            } else {
                println!("Gemini API key: Not configured");
            }
        }
        ConfigKey::Model => {
            let config = Config::load()?;
            println!("Gemini model: {}", config.model);
            println!("Suggested models: {}", SUGGESTED_MODELS.join(", "));
        }
        ConfigKey::CustomPrompt => {
            let config = Config::load()?;
            if config.custom_prompt.trim().is_empty() {
                println!("Custom prompt: Not set (using the default instructions)");
            } else {
                println!("Custom prompt: {}", config.custom_prompt);
            }
        }
        ConfigKey::PromptBeforeInsert => {
            let config = Config::load()?;
            println!("Prompt before insert: {}", config.prompt_before_insert);
        }
    }
    Ok(())
}

/// Handle removing a configuration value
fn handle_remove(key: ConfigKey) -> Result<()> {
    match key {
        ConfigKey::ApiKey => {
            CredentialStore::delete_gemini_key()?;
            println!("Gemini API key has been removed.");
            if CredentialStore::key_from_env() {
                println!("Note: {} is still set in the environment.", GEMINI_API_KEY_ENV);
            }
            Ok(())
        }
        ConfigKey::Model => update_config(|config| {
            config.model = DEFAULT_MODEL.to_string();
            println!("Gemini model reset to default: {}", DEFAULT_MODEL);
            Ok(())
        }),
        ConfigKey::CustomPrompt => update_config(|config| {
            config.custom_prompt.clear();
            println!("Custom prompt removed.");
            Ok(())
        }),
        ConfigKey::PromptBeforeInsert => update_config(|config| {
            config.prompt_before_insert = false;
            println!("Prompt before insert: false");
            Ok(())
        }),
    }
}

/// Load the config file, apply `change` and save it back
fn update_config(change: impl FnOnce(&mut Config) -> Result<()>) -> Result<()> {
    let mut config = Config::load()?;
    change(&mut config)?;
    config.save()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(GemcommitError::InvalidInput(format!(
            "Invalid value '{}'. Use true or false.",
            value
        ))),
    }
}
