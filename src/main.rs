use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use prv_sizing::app::{self, AppError};
use prv_sizing::config::{self, DEFAULT_CONFIG_PATH};
use prv_sizing::i18n::{self, keys, Translator};
use prv_sizing::input_file::FileProvider;
use prv_sizing::relief::{SizingConfig, SizingOverrides};
use prv_sizing::report::{self, JsonSink, TextReport};
use prv_sizing::ui_cli::PromptProvider;

#[derive(Parser)]
#[command(name = "prv_sizing", version)]
#[command(about = "Preliminary gas/vapour pressure-relief valve sizing", long_about = None)]
struct Cli {
    /// Path to the configuration file (created with defaults if missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Output language: auto, ko, en
    #[arg(long, global = true)]
    lang: Option<String>,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a relief valve from a TOML process-input file
    Size {
        /// Path to the process-input file
        input: PathBuf,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Enter the process conditions interactively
    Interactive {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the standard orifice designation table
    Table {
        /// Show only this designation letter (e.g. J)
        code: Option<char>,
    },
}

/// Single-run overrides of the `[sizing]` config values
#[derive(Args, Debug)]
struct Overrides {
    /// Discharge coefficient Kd
    #[arg(long)]
    kd: Option<f64>,
    /// Back-pressure correction factor Kb
    #[arg(long)]
    kb: Option<f64>,
    /// Combination correction factor Kc
    #[arg(long)]
    kc: Option<f64>,
    /// Fire environmental factor F
    #[arg(long)]
    env_factor: Option<f64>,
    /// Downstream (back) pressure in kPa absolute
    #[arg(long)]
    downstream_kpa: Option<f64>,
}

impl From<Overrides> for SizingOverrides {
    fn from(o: Overrides) -> Self {
        SizingOverrides {
            kd: o.kd,
            kb: o.kb,
            kc: o.kc,
            environmental_factor: o.env_factor,
            downstream_pressure_kpa: o.downstream_kpa,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택된 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), &cfg.language);
    let tr = Translator::with_pack(lang, Path::new("locales"));

    if let Err(err) = try_run(cli.command, &cfg.sizing, &tr) {
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn try_run(command: Commands, sizing: &SizingConfig, tr: &Translator) -> Result<(), AppError> {
    let stdout = io::stdout();
    match command {
        Commands::Size {
            input,
            json,
            overrides,
        } => {
            let sizing = sizing.with_overrides(&SizingOverrides::from(overrides));
            let mut provider = FileProvider::new(input);
            if json {
                let mut sink = JsonSink::new(stdout.lock());
                app::run(&mut provider, &mut sink, &sizing)?;
            } else {
                let mut sink = TextReport::new(tr, stdout.lock());
                app::run(&mut provider, &mut sink, &sizing)?;
            }
        }
        Commands::Interactive { overrides } => {
            let sizing = sizing.with_overrides(&SizingOverrides::from(overrides));
            let stdin = io::stdin();
            let mut provider = PromptProvider::new(tr, stdin.lock(), io::stdout());
            let mut sink = TextReport::new(tr, io::stdout());
            app::run(&mut provider, &mut sink, &sizing)?;
        }
        Commands::Table { code } => {
            report::print_designations(tr, stdout.lock(), code)?;
        }
    }
    Ok(())
}
