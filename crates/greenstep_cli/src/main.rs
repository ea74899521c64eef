//! `greenstep` terminal front end.
//!
//! # Responsibility
//! - Parse CLI flags into a validated `CatalogConfig`.
//! - Drive the core catalog/detail views and print their text rendering.
//!
//! # Invariants
//! - All catalog semantics live in `greenstep_core`; this binary only wires
//!   and prints.

mod cli;

use clap::Parser;
use cli::{BrowseArgs, Cli, Command, GlobalArgs, ListArgs, QrArgs, ShowArgs};
use greenstep_core::{
    default_catalog_service, default_log_level, init_logging, CatalogConfig, CatalogController,
    CatalogService, Clock, FixtureTreeRepository, InstantClock, LoadStatus, ThreadEntropy,
    TreeDetail,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    init_cli_logging(&cli.global)?;
    let config = load_config(&cli.global)?;

    if cli.global.instant {
        let service = CatalogService::new(
            FixtureTreeRepository::new(),
            InstantClock::new(),
            ThreadEntropy,
            config.without_latency(),
        );
        dispatch(cli.command, service).await
    } else {
        dispatch(cli.command, default_catalog_service(config)).await
    }
}

async fn dispatch<C: Clock>(command: Command, service: Service<C>) -> CliResult<ExitCode> {
    match command {
        Command::List(args) => list(service, args).await,
        Command::Show(args) => show(service, args).await,
        Command::Qr(args) => Ok(qr(service, args)),
        Command::Browse(args) => browse(service, args).await,
        Command::Ping => {
            println!("greenstep_core ping={}", greenstep_core::ping());
            println!("greenstep_core version={}", greenstep_core::core_version());
            Ok(ExitCode::SUCCESS)
        }
    }
}

type Service<C> = CatalogService<FixtureTreeRepository, C, ThreadEntropy>;

async fn list<C: Clock>(service: Service<C>, args: ListArgs) -> CliResult<ExitCode> {
    let mut controller = CatalogController::new(service);
    controller.mount().await;
    controller.view_mut().set_query(args.query);
    finish_catalog(&controller, args.json)
}

async fn browse<C: Clock>(service: Service<C>, args: BrowseArgs) -> CliResult<ExitCode> {
    let mut controller = CatalogController::new(service);
    println!("Loading Trees...");
    controller.mount().await;

    let mut attempt = 0;
    while let LoadStatus::Failed { message } = controller.view().state().status() {
        if attempt == args.retries {
            break;
        }
        attempt += 1;
        println!("{message} Trying again ({attempt}/{})...", args.retries);
        controller.retry().await;
    }

    controller.view_mut().set_query(args.query);
    if let Some(id) = args.select {
        if !controller.view_mut().select(id.as_str()) {
            eprintln!("Tree `{id}` is not in the loaded catalog");
        }
    }

    let code = finish_catalog(&controller, false)?;
    if let Some(detail) = controller.selected_detail() {
        println!("{}", "-".repeat(60));
        print!("{}", detail.render_text());
    }
    Ok(code)
}

fn finish_catalog<C: Clock>(
    controller: &CatalogController<FixtureTreeRepository, C, ThreadEntropy>,
    json: bool,
) -> CliResult<ExitCode> {
    let state = controller.view().state();
    if json && *state.status() == LoadStatus::Ready {
        println!("{}", serde_json::to_string_pretty(&state.visible_trees())?);
    } else {
        print!("{}", controller.view().render_text());
    }

    match state.status() {
        LoadStatus::Failed { .. } => Ok(ExitCode::from(2)),
        _ => Ok(ExitCode::SUCCESS),
    }
}

async fn show<C: Clock>(service: Service<C>, args: ShowArgs) -> CliResult<ExitCode> {
    let Some(record) = service.fetch_tree(args.id.as_str()).await else {
        println!("Tree not found: {}", args.id);
        return Ok(ExitCode::FAILURE);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let qr = service.qr_target(record.id.as_str());
        print!("{}", TreeDetail::from_record(&record, &qr).render_text());
    }
    Ok(ExitCode::SUCCESS)
}

fn qr<C: Clock>(service: Service<C>, args: QrArgs) -> ExitCode {
    let target = service.qr_target(args.id.as_str());
    println!("deep_link={}", target.deep_link);
    println!("image_url={}", target.image_url);
    ExitCode::SUCCESS
}

fn load_config(global: &GlobalArgs) -> CliResult<CatalogConfig> {
    let mut config = match &global.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            CatalogConfig::from_json_str(&raw)?
        }
        None => CatalogConfig::default(),
    };

    if let Some(rate) = global.failure_rate {
        config.failure_rate = rate;
        config.validate()?;
    }
    Ok(config)
}

fn init_cli_logging(global: &GlobalArgs) -> CliResult<()> {
    let Some(dir) = &global.log_dir else {
        return Ok(());
    };
    let dir = dir
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", dir.display()))?;
    let level = global.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, dir)?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}
