use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// 上传文件存放的路径前缀
    #[serde(default = "default_upload_to")]
    pub upload_to: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_to: default_upload_to(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_upload_to() -> String {
    "media/".to_string()
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_str = match std::fs::read_to_string(&config_path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "无法读取配置文件 {config_path}: {e}"
                )));
            }
        };

        Self::from_sources(config_str.as_deref(), |name| env::var(name).ok())
    }

    /// 由配置文件内容 (可选) 与环境变量构建配置，环境变量优先
    pub fn from_sources(
        config_str: Option<&str>,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let mut config: Config = match config_str {
            Some(config_str) => toml::from_str(config_str)
                .map_err(|e| AppError::ConfigError(format!("解析配置文件失败: {e}")))?,
            None => {
                // 数据库 URL 在无配置文件时必须提供
                let url = get_env("DATABASE_URL").ok_or_else(|| {
                    AppError::ConfigError(
                        "缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml".to_string(),
                    )
                })?;
                Config {
                    database: DatabaseConfig {
                        url,
                        max_connections: default_max_connections(),
                    },
                    media: MediaConfig::default(),
                }
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Some(v) = get_env("DATABASE_URL") {
            config.database.url = v;
        }
        if let Some(v) = get_env("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Some(v) = get_env("MEDIA_UPLOAD_TO") {
            config.media.upload_to = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_from_env_only() {
        let config =
            Config::from_sources(None, env_of(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.media.upload_to, "media/");
    }

    #[test]
    fn test_config_requires_database_url_without_file() {
        let err = Config::from_sources(None, env_of(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_config_env_overrides_file() {
        let file = r#"
[database]
url = "postgres://localhost/prizebond"
max_connections = 5

[media]
upload_to = "uploads/"
"#;
        let config = Config::from_sources(
            Some(file),
            env_of(&[("DB_MAX_CONNECTIONS", "3"), ("MEDIA_UPLOAD_TO", "draws/")]),
        )
        .unwrap();
        assert_eq!(config.database.url, "postgres://localhost/prizebond");
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.media.upload_to, "draws/");
    }

    #[test]
    fn test_config_ignores_unparsable_override() {
        let file = "[database]\nurl = \"sqlite::memory:\"\n";
        let config =
            Config::from_sources(Some(file), env_of(&[("DB_MAX_CONNECTIONS", "many")])).unwrap();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.media.upload_to, "media/");
    }
}
