use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .judgepadrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().flatten() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    /// Delay between status polls while a submission is queued or running.
    pub fn poll_interval(&self) -> Duration {
        let millis = self
            .get("POLL_INTERVAL_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2000);
        Duration::from_millis(millis)
    }
}

fn is_config_key(k: &str) -> bool {
    // Accept known keys or JUDGE_* for forward-compat
    const KEYS: &[&str] = &[
        "JUDGE_API_URL",
        "JUDGE_API_HOST",
        "JUDGE_API_KEY",
        "REQUEST_TIMEOUT",
        "POLL_INTERVAL_MS",
        "DEFAULT_LANGUAGE",
        "DEFAULT_THEME",
    ];

    KEYS.contains(&k) || k.starts_with("JUDGE_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("judgepad").join(".judgepadrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert(
        "JUDGE_API_URL".into(),
        "https://judge0-ce.p.rapidapi.com/submissions".into(),
    );
    m.insert("JUDGE_API_HOST".into(), "judge0-ce.p.rapidapi.com".into());

    // Numbers
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("POLL_INTERVAL_MS".into(), "2000".into());

    // Strings
    m.insert("DEFAULT_LANGUAGE".into(), "javascript".into());
    m.insert("DEFAULT_THEME".into(), "cobalt".into());

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_and_prefixed_keys() {
        assert!(is_config_key("JUDGE_API_KEY"));
        assert!(is_config_key("POLL_INTERVAL_MS"));
        assert!(is_config_key("JUDGE_EXTRA_SETTING"));
        assert!(!is_config_key("PATH"));
    }

    #[test]
    fn defaults_cover_wire_settings() {
        let m = default_map();
        assert_eq!(m.get("POLL_INTERVAL_MS").map(String::as_str), Some("2000"));
        assert!(m.get("JUDGE_API_URL").unwrap().starts_with("https://"));
    }
}
