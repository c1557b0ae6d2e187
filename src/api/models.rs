//! Payload types exchanged with the backend

use serde::{Deserialize, Serialize};

/// Where an API key was found
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Source {
    Environment,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub value: String,
    pub source: Source,
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ApiKeys {
    pub openai: Option<ApiKey>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Shell {
    Bash,
    Zsh,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub shell: Option<Shell>,
    pub shell_init_file: Option<String>,
}

/// Interface sounds the backend can play
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Sound {
    Switch,
    Whoosh,
}

/// Arguments of `play_sound`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySoundArgs {
    pub sound: Sound,
    pub volume: f64,
    pub speed: f64,
}
