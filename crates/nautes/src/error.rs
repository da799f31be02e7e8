use nautes_config::ConfigError;
use nautes_core::NautesError;
use thiserror::Error;

/// 引数・設定の誤り
pub const EXIT_USAGE: u8 = 1;
/// リクエストの失敗など、実行時のエラー
pub const EXIT_FAILURE: u8 = 20;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("不明なリソース種別です: {0}\n利用可能な種別は `nautes api-resources` で確認できます")]
    UnknownKind(String),

    #[error("{failed} 件のリソースの削除に失敗しました")]
    BatchFailed { failed: usize },
}

/// エラーの種類から終了コードを決定
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(CliError::UnknownKind(_)) = err.downcast_ref::<CliError>() {
        return EXIT_USAGE;
    }
    if let Some(ConfigError::Missing { .. }) = err.downcast_ref::<ConfigError>() {
        return EXIT_USAGE;
    }
    if let Some(NautesError::UnknownOutputFormat(_)) = err.downcast_ref::<NautesError>() {
        return EXIT_USAGE;
    }
    EXIT_FAILURE
}
