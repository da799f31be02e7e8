#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// 到達できないアドレス（接続は即座に拒否される）
const UNREACHABLE: &str = "http://127.0.0.1:9";

/// 環境変数と設定ファイルの影響を受けないコマンドを作成
fn nautes(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nautes").unwrap();
    cmd.env_remove("GIT_TOKEN")
        .env_remove("API_SERVER")
        .env_remove("PRODUCT")
        .env("NAUTES_CONFIG", config_dir.path().join("config.yaml"))
        .env("RUST_LOG", "warn");
    cmd
}

/// CLIヘルプにすべてのサブコマンドが表示されることを確認
#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("api-resources"));
}

/// getコマンドのヘルプに出力形式とプロダクトのオプションが表示されることを確認
#[test]
fn test_get_help() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["get", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--product"));
}

/// サブコマンドなしは使い方のエラー（終了コード1）
#[test]
fn test_missing_subcommand_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir).assert().failure().code(1);
}

/// 名前なしのdeleteは使い方のエラー
#[test]
fn test_delete_requires_names() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["delete", "cluster", "-t", "token", "-s", UNREACHABLE])
        .assert()
        .failure()
        .code(1);
}

/// 種別一覧はAPIサーバーなしで表示できる
#[test]
fn test_api_resources() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .arg("api-resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("clusters"))
        .stdout(predicate::str::contains("cls"))
        .stdout(predicate::str::contains("projectpipelineruntimes"))
        .stdout(predicate::str::contains("DeploymentRuntime"));
}

/// 不明な出力形式はリクエスト前に拒否される
#[test]
fn test_unknown_output_format() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["get", "cluster", "-o", "xml", "-t", "token", "-s", UNREACHABLE])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown output format"));
}

/// 不明なリソース種別
#[test]
fn test_unknown_kind() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["get", "widgets", "-t", "token", "-s", UNREACHABLE])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("widgets"));
}

/// トークン未指定
#[test]
fn test_missing_token() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["get", "cluster", "-s", UNREACHABLE])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("GIT_TOKEN"));
}

/// プロダクト配下の種別はプロダクト名が必須
#[test]
fn test_scoped_kind_requires_product() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["get", "env", "-t", "token", "-s", UNREACHABLE])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PRODUCT"));
}

/// 存在しないマニフェストは実行時エラー（終了コード20）
#[test]
fn test_apply_missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    nautes(&dir)
        .args(["apply", "-f"])
        .arg(dir.path().join("missing.yaml"))
        .args(["-t", "token", "-s", UNREACHABLE])
        .assert()
        .failure()
        .code(20)
        .stderr(predicate::str::contains("missing.yaml"));
}

/// 設定ファイルの接続先が使われ、接続失敗は終了コード20
#[test]
fn test_settings_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        format!("api_server: {}\ntoken: from-file\n", UNREACHABLE),
    )
    .unwrap();

    nautes(&dir)
        .args(["get", "cluster"])
        .assert()
        .failure()
        .code(20)
        .stderr(predicate::str::contains("127.0.0.1:9"));
}
