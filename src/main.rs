/// Version injected at compile time via TAGFINDER_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("TAGFINDER_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tagfinder::config::Config;
use tagfinder::output::{self, OutputFormat};
use tagfinder::{describe_error, Arn, ResourceFilter, ResourceLister};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Find AWS resources by tag or service
#[derive(Parser, Debug)]
#[command(name = "tagfinder", version = VERSION, about, long_about = None)]
struct Args {
    /// AWS region to query
    #[arg(long, global = true)]
    region: Option<String>,

    /// AWS shared-config profile to use
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Alternate tagging API endpoint (e.g. LocalStack)
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Log level for debugging (written to the log file)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Log destination; `-` for stderr. Defaults to tagfinder.log next to the config file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resources
    List {
        /// Tag filter as comma separated key/value pairs: key1,value1,key2,value2
        #[arg(short, long)]
        tags: Option<String>,

        /// Service filter as a comma separated list: ec2,s3,rds
        #[arg(short, long)]
        services: Option<String>,

        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// Show the components of an ARN
    Arn {
        arn: String,

        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// Show or update stored defaults
    Config {
        #[arg(long)]
        set_region: Option<String>,

        #[arg(long)]
        set_profile: Option<String>,

        #[arg(long, value_enum)]
        set_output: Option<OutputFormat>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Install the process-wide subscriber. Only tagfinder's own events are
/// logged at `level`; dependencies (the AWS SDK) stay at warn.
fn setup_logging(
    level: LogLevel,
    log_file: Option<PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = log_file.unwrap_or_else(Config::log_path);
    let (writer, guard) = if log_path.as_os_str() == "-" {
        tracing_appender::non_blocking(std::io::stderr())
    } else {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {:?}", log_path))?;
        tracing_appender::non_blocking(file)
    };

    let directive = format!("warn,tagfinder={}", tracing_level.as_str().to_lowercase());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("tagfinder {} logging at {:?} to {:?}", VERSION, level, log_path);

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level, args.log_file.clone()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    match args.command {
        Command::List {
            tags,
            services,
            output,
        } => {
            let mut filter = ResourceFilter::new();
            if let Some(tags) = tags.filter(|t| !t.is_empty()) {
                let tags = ResourceFilter::parse_tag_pairs(&tags)?;
                eprintln!("filtering by tags: {:?}", tags);
                filter = filter.with_tags(tags);
            }
            if let Some(services) = services.filter(|s| !s.is_empty()) {
                let services = ResourceFilter::parse_resource_types(&services);
                eprintln!("filtering by services: {:?}", services);
                filter = filter.with_resource_types(services);
            }

            let settings = config.aws_settings(args.region, args.profile, args.endpoint_url);
            tracing::info!("Using settings: {:?}", settings);

            let lister = ResourceLister::from_env(&settings).await?;
            let resources = lister.list_resources(&filter).await?;
            tracing::info!("Listed {} resources", resources.len());

            print!("{}", output::render(&resources, config.effective_output(output))?);
        }
        Command::Arn { arn, output } => {
            let arn = Arn::parse(&arn)?;
            print!("{}", output::render_arn(&arn, config.effective_output(output))?);
        }
        Command::Config {
            set_region,
            set_profile,
            set_output,
        } => {
            let changed = set_region.is_some() || set_profile.is_some() || set_output.is_some();
            if let Some(region) = set_region {
                config.region = Some(region);
            }
            if let Some(profile) = set_profile {
                config.profile = Some(profile);
            }
            if let Some(output) = set_output {
                config.output = Some(output);
            }
            if changed {
                config.save().context("Failed to save configuration")?;
            }

            if let Some(path) = Config::config_path() {
                println!("# {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
