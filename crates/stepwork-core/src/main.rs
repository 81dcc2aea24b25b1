use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::{Path, PathBuf};
use stepwork_core::{
    aggregator, evaluate_completion, ExportDocument, FieldData, PasswordGate, ProgressRecord,
    Role, StageDates, WorkbookConfig,
};
use tracing_subscriber::EnvFilter;

fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .required(true)
        .value_parser(value_parser!(u8))
        .help("Stage number (1-12)")
}

fn data_arg() -> Arg {
    Arg::new("data")
        .long("data")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON file holding the stage's field data")
}

fn cli() -> Command {
    Command::new("stepwork")
        .version(stepwork_core::VERSION)
        .about("Stage-completion engine for the 12-stage workbook")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("catalog")
                .about("Print the stage catalog")
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .value_parser(value_parser!(u8))
                        .help("Print only this stage"),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Derive progress metrics from a record set")
                .arg(
                    Arg::new("records")
                        .long("records")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding an array of progress records"),
                )
                .arg(
                    Arg::new("now")
                        .long("now")
                        .help("Evaluation instant (RFC 3339), defaults to the current time"),
                )
                .arg(
                    Arg::new("sponsor")
                        .long("sponsor")
                        .action(ArgAction::SetTrue)
                        .help("Compute stage access for the sponsor role"),
                ),
        )
        .subcommand(
            Command::new("evaluate")
                .about("List outstanding requirements of a stage")
                .arg(stage_arg())
                .arg(data_arg())
                .arg(
                    Arg::new("exported")
                        .long("exported")
                        .action(ArgAction::SetTrue)
                        .help("Treat the stage as exported"),
                ),
        )
        .subcommand(
            Command::new("unlock")
                .about("Check a stage password")
                .arg(stage_arg())
                .arg(
                    Arg::new("password")
                        .long("password")
                        .required(true)
                        .help("Candidate password"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Build the export content tree of a stage")
                .arg(stage_arg())
                .arg(data_arg())
                .arg(Arg::new("assigned").long("assigned").help("Assignment date (RFC 3339)"))
                .arg(Arg::new("completed").long("completed").help("Completion date (RFC 3339)")),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<WorkbookConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => WorkbookConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(WorkbookConfig::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing {}", path.display()))
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid RFC 3339 timestamp: {raw}"))?
        .with_timezone(&Utc))
}

fn optional_instant(args: &ArgMatches, name: &str) -> Result<Option<DateTime<Utc>>> {
    args.get_one::<String>(name)
        .map(|raw| parse_instant(raw))
        .transpose()
}

fn stage(args: &ArgMatches) -> Result<&'static stepwork_catalog::Stage> {
    let number = args.get_one::<u8>("stage").copied().unwrap_or_default();
    Ok(stepwork_catalog::stage(number)?)
}

fn data(args: &ArgMatches) -> Result<FieldData> {
    let path = args
        .get_one::<PathBuf>("data")
        .context("--data is required")?;
    read_json(path)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput {
    #[serde(flatten)]
    summary: aggregator::ProgressSummary,
    program_complete: bool,
    total_days_display: String,
    current_stage_days_display: String,
    stages: Vec<aggregator::StageOverview>,
}

#[derive(Serialize)]
struct UnlockOutput {
    stage: u8,
    unlocked: bool,
    hint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("catalog", args)) => match args.get_one::<u8>("stage") {
            Some(number) => print_json(stepwork_catalog::stage(*number)?),
            None => print_json(&stepwork_catalog::STAGES),
        },
        Some(("summary", args)) => {
            let path = args
                .get_one::<PathBuf>("records")
                .context("--records is required")?;
            let mut records: Vec<ProgressRecord> = read_json(path)?;
            records.sort_by_key(|record| record.stage_number);
            let now = optional_instant(args, "now")?.unwrap_or_else(Utc::now);
            let role = if args.get_flag("sponsor") {
                Role::Sponsor
            } else {
                Role::Sponsee
            };
            let summary = aggregator::derive_progress_summary(&records, now);
            tracing::info!(records = records.len(), "Summary derived");
            print_json(&SummaryOutput {
                program_complete: summary.program_complete(),
                total_days_display: aggregator::format_days(summary.total_days).to_string(),
                current_stage_days_display: aggregator::format_days(summary.current_stage_days)
                    .to_string(),
                stages: aggregator::stage_overview(&records, role),
                summary,
            })
        }
        Some(("evaluate", args)) => {
            let stage = stage(args)?;
            let data = data(args)?;
            let exported = args.get_flag("exported") || data.has_exported();
            let report = evaluate_completion(stage, &data, exported);
            tracing::info!(
                stage = %stage.number,
                missing = report.missing.len(),
                "Stage evaluated"
            );
            print_json(&report)
        }
        Some(("unlock", args)) => {
            let stage = stage(args)?;
            let candidate = args
                .get_one::<String>("password")
                .context("--password is required")?;
            let mut gate = PasswordGate::new(stage.number, &config);
            let outcome = gate.attempt(candidate);
            print_json(&UnlockOutput {
                stage: stage.number.get(),
                unlocked: outcome.is_unlocked(),
                hint: gate.hint(),
            })
        }
        Some(("export", args)) => {
            let stage = stage(args)?;
            let data = data(args)?;
            let dates = StageDates {
                assigned: optional_instant(args, "assigned")?,
                completed: optional_instant(args, "completed")?,
            };
            print_json(&ExportDocument::build(stage, &data, dates, Utc::now()))
        }
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
