mod commands;
mod error;
mod prompt;

use clap::{Parser, Subcommand};
use colored::Colorize;
use nautes_config::{API_SERVER_ENV, PRODUCT_ENV, TOKEN_ENV};
use nautes_core::{ClientOptions, Dispatcher, HttpTransport, Registry};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nautes")]
#[command(about = "宣言的なマニフェストを Nautes API サーバーへ適用する", long_about = None)]
#[command(version)]
struct Cli {
    /// 認証トークン
    #[arg(short = 't', long, env = TOKEN_ENV, global = true, hide_env_values = true)]
    token: Option<String>,

    /// APIサーバーのアドレス
    #[arg(short = 's', long = "api-server", env = API_SERVER_ENV, global = true)]
    api_server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// マニフェストのリソースを作成・更新
    Apply {
        /// マニフェストファイル
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
        /// サーバー側のコンプライアンスチェックを省略
        #[arg(short = 'i', long = "insecure-skip-check")]
        insecure_skip_check: bool,
    },
    /// マニフェストのリソースを削除
    Remove {
        /// マニフェストファイル
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
        /// サーバー側のコンプライアンスチェックを省略
        #[arg(short = 'i', long = "insecure-skip-check")]
        insecure_skip_check: bool,
    },
    /// リソースを取得
    #[command(after_help = "例:\n  nautes get cluster\n  nautes get env dev -p my-product -o yaml")]
    Get {
        /// リソース種別 (cluster, product, env, ...)
        kind: String,
        /// リソース名（省略時は一覧を取得）
        names: Vec<String>,
        /// 出力形式 (json|yaml|wide)
        #[arg(short = 'o', long, default_value = "wide")]
        output: String,
        /// プロダクト名
        #[arg(short = 'p', long, env = PRODUCT_ENV)]
        product: Option<String>,
    },
    /// リソースを名前で削除
    #[command(after_help = "例:\n  nautes delete project web -p my-product\n  nautes delete cr api web -p my-product -y")]
    Delete {
        /// リソース種別 (cluster, product, env, ...)
        kind: String,
        /// 削除するリソース名
        #[arg(required = true)]
        names: Vec<String>,
        /// 確認なしで削除
        #[arg(short = 'y', long)]
        yes: bool,
        /// プロダクト名
        #[arg(short = 'p', long, env = PRODUCT_ENV)]
        product: Option<String>,
    },
    /// 利用可能なリソース種別を一覧表示
    ApiResources,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help / --version は正常終了
            let code = if err.use_stderr() { error::EXIT_USAGE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    // stdout は json/yaml 出力に使うので、ログは stderr に出力
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "エラー:".red().bold(), err);
            ExitCode::from(error::exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = Registry::builtin();

    if matches!(cli.command, Commands::ApiResources) {
        return commands::api_resources::handle(&registry);
    }

    let product_flag = match &cli.command {
        Commands::Get { product, .. } | Commands::Delete { product, .. } => product.clone(),
        _ => None,
    };
    let settings = nautes_config::load()?.overlay(cli.api_server, cli.token, product_flag);
    let skip_check = match &cli.command {
        Commands::Apply {
            insecure_skip_check,
            ..
        }
        | Commands::Remove {
            insecure_skip_check,
            ..
        } => *insecure_skip_check,
        _ => false,
    };
    let options = ClientOptions {
        server: settings.require_api_server()?.to_string(),
        token: settings.require_token()?.to_string(),
        skip_check,
    };

    let transport = HttpTransport::new();
    let dispatcher = Dispatcher::new(&registry, &transport, options);

    match cli.command {
        Commands::Apply { file, .. } => commands::apply::handle(&registry, &dispatcher, &file).await,
        Commands::Remove { file, .. } => {
            commands::remove::handle(&registry, &dispatcher, &file).await
        }
        Commands::Get {
            kind,
            names,
            output,
            ..
        } => commands::get::handle(&registry, &dispatcher, &settings, &kind, &names, &output).await,
        Commands::Delete {
            kind, names, yes, ..
        } => commands::delete::handle(&registry, &dispatcher, &settings, &kind, &names, yes).await,
        Commands::ApiResources => commands::api_resources::handle(&registry),
    }
}
