use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context};

use football_report::config::init_project;
use football_report::error::AppResult;
use football_report::feed::FlashscoreClient;
use football_report::logging::{init_tracing, log_runtime_environment};
use football_report::messaging::ProgressBus;
use football_report::pipeline::{FailureKind, ProcessedFixture};
use football_report::{CancellationToken, FeedSettings, ProjectPaths, ReportPipeline, RunResult};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_OFFLINE: i32 = 3;
const EXIT_CANCELLED: i32 = 130;

const USAGE: &str = "\
Usage: football-report [OPTIONS]

Options:
  --root <dir>           Project directory holding config/ and templates/
  --init                 Create missing config files and templates, then exit
  --open                 Open the output folder after a successful run
  --verbose-decisions    Print the decision for every fixture
  -h, --help             Show this help";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    root: Option<PathBuf>,
    init: bool,
    open: bool,
    verbose_decisions: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> AppResult<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--root" => {
                let dir = args.next().context("--root requires a directory")?;
                parsed.root = Some(PathBuf::from(dir));
            }
            "--init" => parsed.init = true,
            "--open" => parsed.open = true,
            "--verbose-decisions" => parsed.verbose_decisions = true,
            "-h" | "--help" => parsed.help = true,
            other => bail!("Unknown argument: {}", other),
        }
    }
    Ok(parsed)
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("✗ {}\n\n{}", e, USAGE);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    init_tracing(args.verbose_decisions);
    log_runtime_environment();

    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(args: &CliArgs) -> AppResult<i32> {
    let paths = match &args.root {
        Some(root) => ProjectPaths::new(root),
        None => ProjectPaths::locate(),
    };
    println!("Project: {}", paths.root().display());

    if args.init {
        let created = init_project(&paths).context("Failed to initialize project")?;
        if created.is_empty() {
            println!("✓ Nothing to create");
        }
        for path in created {
            println!("✓ Created {}", path.display());
        }
        return Ok(EXIT_SUCCESS);
    }

    let settings = match FeedSettings::load(&paths) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("✗ Feed settings: {}", e);
            eprintln!(
                "  Set {} or add api_key to {}",
                football_report::config::API_KEY_ENV,
                paths.config_file(football_report::config::FEED_SETTINGS_FILE).display()
            );
            return Ok(EXIT_CONFIG);
        }
    };

    let pipeline = ReportPipeline::new(paths.clone(), FlashscoreClient::new(&settings));

    // Setup Ctrl+C handler
    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nCancelling...");
        handler_token.cancel();
    }) {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    let bus = ProgressBus::new();
    let rx = bus.listen();
    tracing::debug!("Progress listeners: {}", bus.listener_count());
    let printer = thread::spawn(move || {
        while let Ok(event) = rx.recv() {
            println!("  {}", event.description());
        }
    });

    let outcome = pipeline.run(&token, &bus);

    // Disconnect the printer so it drains and exits
    bus.close();
    let _ = printer.join();

    let result = match outcome {
        Ok(result) => result,
        Err(cancelled) => {
            eprintln!("✗ {}", cancelled);
            return Ok(EXIT_CANCELLED);
        }
    };

    if args.verbose_decisions {
        print_decisions(&result);
    }

    if !result.success {
        eprintln!(
            "✗ Run failed: {}",
            result.error_message.as_deref().unwrap_or("unknown error")
        );
        return Ok(match result.failure {
            Some(FailureKind::Offline) => EXIT_OFFLINE,
            Some(FailureKind::Config) => EXIT_CONFIG,
            _ => EXIT_FAILURE,
        });
    }

    println!("✓ {}", result.summary());
    for file in &result.rendered_files {
        println!("  {}", file.display());
    }

    if args.open && !result.rendered_files.is_empty() {
        let out_dir = paths.out_dir();
        if let Err(e) = open::that(&out_dir) {
            tracing::warn!("Failed to open {}: {}", out_dir.display(), e);
        }
    }

    Ok(EXIT_SUCCESS)
}

fn print_decisions(result: &RunResult) {
    fn print_group(title: &str, items: &[ProcessedFixture]) {
        println!("\n{} ({})", title, items.len());
        for item in items {
            println!("  [{}] {}", item.category, item.fixture);
            println!("      {}", item.decision);
        }
    }

    print_group("Included", &result.included);
    print_group("Excluded", &result.excluded);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let parsed = parse_args(args(&["--root", "/tmp/report", "--open", "--verbose-decisions"])).unwrap();
        assert_eq!(parsed.root, Some(PathBuf::from("/tmp/report")));
        assert!(parsed.open);
        assert!(parsed.verbose_decisions);
        assert!(!parsed.init);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--root"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
