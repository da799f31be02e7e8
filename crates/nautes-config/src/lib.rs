pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "NAUTES_CONFIG";

pub const API_SERVER_ENV: &str = "API_SERVER";
pub const TOKEN_ENV: &str = "GIT_TOKEN";
pub const PRODUCT_ENV: &str = "PRODUCT";

/// 接続設定
///
/// 優先順位: コマンドラインオプション > 環境変数 > 設定ファイル
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_server: Option<String>,
    pub token: Option<String>,
    pub product: Option<String>,
}

impl Settings {
    /// オプション・環境変数で与えられた値で上書きする
    ///
    /// 空文字列は未指定として扱う。
    pub fn overlay(
        self,
        api_server: Option<String>,
        token: Option<String>,
        product: Option<String>,
    ) -> Self {
        Self {
            api_server: non_empty(api_server).or(self.api_server),
            token: non_empty(token).or(self.token),
            product: non_empty(product).or(self.product),
        }
    }

    pub fn require_api_server(&self) -> Result<&str> {
        self.api_server.as_deref().ok_or(ConfigError::Missing {
            name: "APIサーバー",
            flag: "api-server",
            env: API_SERVER_ENV,
        })
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(ConfigError::Missing {
            name: "トークン",
            flag: "token",
            env: TOKEN_ENV,
        })
    }

    pub fn require_product(&self) -> Result<&str> {
        self.product.as_deref().ok_or(ConfigError::Missing {
            name: "プロダクト",
            flag: "product",
            env: PRODUCT_ENV,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 設定ファイルのパスを取得
///
/// 1. 環境変数 NAUTES_CONFIG (直接パス指定)
/// 2. ~/.config/nautes/config.yaml
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("nautes")
        .join("config.yaml"))
}

/// 設定ファイルを読み込む
///
/// ファイルが存在しない場合は空の設定を返す。
pub fn load() -> Result<Settings> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
