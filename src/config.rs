use std::env;
use std::str::FromStr;

use anyhow::Result;
use tracing::warn;

use crate::render::wordcloud::parse_color;

/// Default cap on words drawn in a cloud.
pub const DEFAULT_MAX_WORDS: usize = 2000;

/// Central configuration loaded from environment variables.
///
/// These are the run-wide defaults; command-line flags override them. The
/// .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stopword language (PEACECLOUD_LANGUAGE, default "spanish")
    pub language: String,
    /// Word cap for clouds (PEACECLOUD_MAX_WORDS, default 2000)
    pub max_words: usize,
    /// Cloud background colour (PEACECLOUD_BACKGROUND, default "white")
    pub background: String,
    /// Seed for layout, colours and topic sampling (PEACECLOUD_SEED, default 1)
    pub seed: u64,
    /// Font family for drawing (PEACECLOUD_FONT, default "sans-serif")
    pub font_family: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Malformed numbers fall back to their defaults with a warning rather
    /// than failing; an unparseable colour is an error.
    pub fn load() -> Result<Self> {
        let config = Self {
            language: env::var("PEACECLOUD_LANGUAGE").unwrap_or_else(|_| "spanish".to_string()),
            max_words: env::var("PEACECLOUD_MAX_WORDS")
                .map(|raw| parse_or_default(&raw, DEFAULT_MAX_WORDS, "PEACECLOUD_MAX_WORDS"))
                .unwrap_or(DEFAULT_MAX_WORDS),
            background: env::var("PEACECLOUD_BACKGROUND").unwrap_or_else(|_| "white".to_string()),
            seed: env::var("PEACECLOUD_SEED")
                .map(|raw| parse_or_default(&raw, 1, "PEACECLOUD_SEED"))
                .unwrap_or(1),
            font_family: env::var("PEACECLOUD_FONT")
                .unwrap_or_else(|_| "sans-serif".to_string()),
        };
        config.require_background()?;
        Ok(config)
    }

    /// Check that the configured background colour parses.
    pub fn require_background(&self) -> Result<()> {
        parse_color(&self.background).map(|_| ())
    }

    /// Resolve the word cap from an optional raw `--max` value.
    pub fn max_words_from(&self, raw: Option<&str>) -> usize {
        match raw {
            Some(raw) => parse_or_default(raw, self.max_words, "-m/--max"),
            None => self.max_words,
        }
    }
}

/// Parse a value, falling back to `default` with a printed warning when it
/// is malformed.
pub fn parse_or_default<T>(raw: &str, default: T, name: &str) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(value = raw, flag = name, %default, "Not a number, using default");
            println!("{name} must be a number. Taking {default} as default.");
            default
        }
    }
}
