pub const DEFAULT_HISTORY_SIZE: usize = 10;
pub const DEFAULT_LISTEN_SECONDS: u64 = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const PROMPT: &str = "> ";

pub mod commands {
    pub const SPEAK: &[&str] = &[":speak", ":listen"];
    pub const HISTORY: &str = ":history";
    pub const HELP: &str = ":help";
}

pub mod messages {
    pub const LISTENING: &str = "Listening...";
    pub const VOICE_UNAVAILABLE: &str = "Voice input is unavailable. Set GROQ_API_KEY to enable it.";
    pub const NO_HISTORY: &str = "No commands yet.";
}
