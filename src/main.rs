use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use colored::Colorize;
use std::env;
use std::process;
use stratum_ddl::cli::commands::render::{RenderCommand, RenderCommandHandler};
use stratum_ddl::cli::commands::translate::{TranslateCommand, TranslateCommandHandler};
use stratum_ddl::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    init_tracing(cli.verbose, !cli.no_color);

    match run_command(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// ログ出力を初期化する
///
/// `--verbose` の場合はdebugレベル、それ以外は `RUST_LOG` またはwarnレベル。
fn init_tracing(verbose: bool, ansi: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    match cli.command {
        Commands::Translate {
            input,
            config,
            dialect,
            operation,
            template_dir,
            output,
        } => {
            let handler = TranslateCommandHandler::new();
            let command = TranslateCommand {
                project_path,
                config_path: config,
                input,
                dialect,
                operation,
                template_dir,
                output,
            };
            handler.execute(&command)
        }

        Commands::Render {
            template,
            params,
            param,
            output,
        } => {
            let handler = RenderCommandHandler::new();
            let command = RenderCommand {
                project_path,
                template,
                params_file: params,
                params: param,
                output,
            };
            handler.execute(&command)
        }
    }
}
