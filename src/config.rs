use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 누락된 항목은 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드 (auto/en/es/ko)
    pub language: String,
    /// 언어팩 디렉터리 (없으면 ./locales 만 확인)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_dir: Option<String>,
    /// 계산 이력 CSV 경로
    pub history_path: PathBuf,
    /// 계산 후 이력에 자동 저장할지 여부
    pub save_history: bool,
    /// 결과 표시 소수점 자릿수
    pub decimals: usize,
    /// 커패시터 AC 계산의 기본 주파수 [Hz]
    pub default_frequency_hz: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            locale_dir: None,
            history_path: PathBuf::from("history.csv"),
            save_history: true,
            decimals: 2,
            default_frequency_hz: 60.0,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }

    /// 소수점 자릿수는 0~9로 제한한다.
    pub fn display_decimals(&self) -> usize {
        self.decimals.min(crate::quantity::MAX_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"es\"\ndecimals = 3\n").unwrap();
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg.language, "es");
        assert_eq!(cfg.decimals, 3);
        assert_eq!(cfg.history_path, PathBuf::from("history.csv"));
        assert!(cfg.save_history);
    }

    #[test]
    fn save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config {
            language: "ko".into(),
            decimals: 4,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(load_or_default_at(&path).unwrap(), cfg);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "decimals = \"many\"").unwrap();
        assert!(matches!(load_or_default_at(&path), Err(ConfigError::Parse(_))));
    }
}
