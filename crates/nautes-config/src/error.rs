use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error("設定ファイルの解析に失敗しました: {path}\n{message}")]
    Parse { path: PathBuf, message: String },

    #[error("{name} が指定されていません。--{flag} オプションまたは環境変数 {env} で指定してください")]
    Missing {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
