use std::{
    collections::HashMap,
    env, fs,
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

        // Read .deckgenrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
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

        Self {
            inner: map,
            config_path,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(|v| v.parse::<f32>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).filter(|v| !v.is_empty()).map(PathBuf::from)
    }

    /// Scratch directory for every generated file (plots, packages, pages).
    /// Treated as append-only; cleanup belongs to the host environment.
    pub fn scratch_path(&self) -> PathBuf {
        self.get_path("SCRATCH_PATH")
            .unwrap_or_else(|| env::temp_dir().join("deckgen"))
    }

    pub fn python_bin(&self) -> String {
        self.get("PYTHON_BIN").unwrap_or_else(|| "python3".into())
    }

    pub fn soffice_bin(&self) -> String {
        self.get("SOFFICE_BIN").unwrap_or_else(|| "soffice".into())
    }

    pub fn pdftoppm_bin(&self) -> String {
        self.get("PDFTOPPM_BIN").unwrap_or_else(|| "pdftoppm".into())
    }

    pub fn exec_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64("EXEC_TIMEOUT").unwrap_or(120))
    }

    pub fn convert_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64("CONVERT_TIMEOUT").unwrap_or(30))
    }

    pub fn preview_dpi(&self) -> u32 {
        self.get_u64("PREVIEW_DPI").unwrap_or(150) as u32
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "SCRATCH_PATH",
        "PYTHON_BIN",
        "SOFFICE_BIN",
        "PDFTOPPM_BIN",
        "EXEC_TIMEOUT",
        "CONVERT_TIMEOUT",
        "PREVIEW_DPI",
        "FALLBACK_FONT",
        "IMG_WIDTH_IN",
        "IMG_HEIGHT_IN",
        "FONT_SIZE_PT",
        "BODY_PREVIEW_LINES",
    ];
    KEYS.contains(&k) || k.starts_with("DECKGEN_")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("EXEC_TIMEOUT".into(), "120".into());
    m.insert("CONVERT_TIMEOUT".into(), "30".into());
    m.insert("PREVIEW_DPI".into(), "150".into());
    m.insert("IMG_WIDTH_IN".into(), "5.0".into());
    m.insert("IMG_HEIGHT_IN".into(), "3.0".into());
    m.insert("FONT_SIZE_PT".into(), "14".into());
    m.insert("BODY_PREVIEW_LINES".into(), "12".into());
    m
}

fn default_config_path() -> PathBuf {
    if let Some(base) = BaseDirs::new() {
        base.config_dir().join("deckgen").join(".deckgenrc")
    } else {
        PathBuf::from(".deckgenrc")
    }
}
