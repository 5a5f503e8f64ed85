//! Structured Logging with Redaction
//!
//! Log lines go to stderr as `[timestamp] LEVEL [module] message | k=v ...`.
//! Field values are classified by key name: key material is always hidden,
//! bech32 addresses and hashes are shortened, everything else is printed.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// How a field value is shown, decided from its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redaction {
    Hidden,
    Address,
    Hash,
    Plain,
}

const SECRET_KEYS: &[&str] = &["private", "secret", "mnemonic", "seed", "password", "key_hex", "signature"];
const ADDRESS_KEYS: &[&str] = &["address", "sender", "recipient", "receiver", "signer", "delegator", "validator"];
const HASH_KEYS: &[&str] = &["hash", "txhash", "sign_bytes"];

fn classify(key: &str) -> Redaction {
    let key = key.to_lowercase();
    let matches = |list: &[&str]| list.iter().any(|k| key.contains(k));
    if matches(SECRET_KEYS) {
        Redaction::Hidden
    } else if matches(ADDRESS_KEYS) {
        Redaction::Address
    } else if matches(HASH_KEYS) {
        Redaction::Hash
    } else {
        Redaction::Plain
    }
}

#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, redacted according to its key
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let raw = value.to_string();
        let shown = match classify(key) {
            Redaction::Hidden => redact_value(&raw),
            Redaction::Address => redact_address(&raw),
            Redaction::Hash => redact_hash(&raw),
            Redaction::Plain => raw,
        };
        self.fields.push((key, shown));
        self
    }

    pub fn render(&self) -> String {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let mut line = format!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message);
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&fields);
        }
        line
    }

    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }
        eprintln!("{}", self.render());
    }
}

fn redact_value(value: &str) -> String {
    match value.len() {
        0 => "[EMPTY]".to_string(),
        1..=4 => "[REDACTED]".to_string(),
        n => format!("[REDACTED:{}chars]", n),
    }
}

/// Keep the human-readable part and the last four characters of a bech32
/// address, e.g. `cro1u9q8...7ppf`
fn redact_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.len() <= 12 {
        return trimmed.to_string();
    }
    let prefix_len = trimmed.find('1').map(|i| i + 5).unwrap_or(6).min(trimmed.len() - 4);
    match (trimmed.get(..prefix_len), trimmed.get(trimmed.len() - 4..)) {
        (Some(prefix), Some(suffix)) => format!("{}...{}", prefix, suffix),
        _ => redact_value(trimmed),
    }
}

fn redact_hash(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() <= 20 {
        return trimmed.to_string();
    }
    match (trimmed.get(..10), trimmed.get(trimmed.len() - 6..)) {
        (Some(prefix), Some(suffix)) => format!("{}...{}", prefix, suffix),
        _ => redact_value(trimmed),
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $module:expr, $msg:expr $(, $key:ident = $value:expr)*) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::$level,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($args:tt)*) => { $crate::__log_at!(Debug, $($args)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($args:tt)*) => { $crate::__log_at!(Info, $($args)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($args:tt)*) => { $crate::__log_at!(Warn, $($args)*) };
}
