mod debug_report;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use syntagma::{
    Lexicon, MergeOptions, Pipeline, PipelineOptions, french_rules, load_lexicon, load_rules_or_passthrough,
    parse_conllu, read_conllu_file,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_PASSES: usize = 10;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.debug);

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    input: Option<PathBuf>,
    rules: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    multi_pass: bool,
    max_passes: usize,
    level1_only: bool,
    debug: bool,
    color: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("warn,syntagma=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn run(config: &CliConfig) -> Result<(), String> {
    let sentences = match &config.input {
        Some(path) => read_conllu_file(path),
        None => parse_conllu(&read_stdin_input()?),
    }
    .map_err(|err| err.to_string())?;

    let rules = match &config.rules {
        Some(path) => load_rules_or_passthrough(path),
        None => french_rules(),
    };
    let lexicon = match &config.lexicon {
        Some(path) => load_lexicon(path).map_err(|err| err.to_string())?,
        None => Lexicon::french().clone(),
    };

    let options = PipelineOptions {
        enable_level2: !config.level1_only,
        merge: MergeOptions { multi_pass: config.multi_pass, max_passes: config.max_passes },
        ..PipelineOptions::default()
    };
    let pipeline = Pipeline::new(&rules, &lexicon, options);
    let analyses = pipeline.analyze_batch(&sentences);

    let merger = pipeline.merger();
    let summary = debug_report::RunSummary {
        level2: !config.level1_only,
        multi_pass: merger.options().multi_pass,
        max_passes: merger.options().max_passes,
        rule_count: merger.rules().len(),
    };
    debug_report::print_run(&analyses, &summary, config.debug, config.color);
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        input: None,
        rules: None,
        lexicon: None,
        multi_pass: false,
        max_passes: DEFAULT_MAX_PASSES,
        level1_only: false,
        debug: false,
        color: io::stdout().is_terminal(),
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("syntagma {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--multi-pass" => config.multi_pass = true,
            "--level1-only" => config.level1_only = true,
            "--debug" => config.debug = true,
            "--rules" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                config.rules = Some(PathBuf::from(value));
            }
            "--lexicon" => {
                let value = args.next().ok_or_else(|| "error: --lexicon expects a value".to_string())?;
                config.lexicon = Some(PathBuf::from(value));
            }
            "--max-passes" => {
                let value = args.next().ok_or_else(|| "error: --max-passes expects a value".to_string())?;
                config.max_passes = parse_max_passes(&value)?;
            }
            _ if arg.starts_with("--rules=") => {
                config.rules = Some(PathBuf::from(arg.trim_start_matches("--rules=")));
            }
            _ if arg.starts_with("--lexicon=") => {
                config.lexicon = Some(PathBuf::from(arg.trim_start_matches("--lexicon=")));
            }
            _ if arg.starts_with("--max-passes=") => {
                config.max_passes = parse_max_passes(arg.trim_start_matches("--max-passes="))?;
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if config.input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                if arg != "-" {
                    config.input = Some(PathBuf::from(arg));
                }
            }
        }
    }

    if config.input.is_none() && io::stdin().is_terminal() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(config)
}

fn parse_max_passes(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("error: invalid --max-passes '{value}' (expected a non-negative integer)"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "syntagma {version}

Two-level phrase chunker for dependency-parsed (CoNLL-U) French text.

Usage:
  syntagma [OPTIONS] [FILE]

Reads CoNLL-U from FILE, or from stdin when FILE is omitted or '-'.

Options:
  --rules <json>          Level 2 rule file. Default: built-in French rules.
  --lexicon <json>        Lexicon file. Default: built-in French lexicon.
  --multi-pass            Repeat Level 2 passes until nothing merges.
  --max-passes <n>        Pass limit in multi-pass mode. Default: {max_passes}
  --level1-only           Skip Level 2.
  --debug                 Print merge events and debug logs (stderr).
  --color                 Force ANSI color output.
  --no-color              Disable ANSI color output.
  -h, --help              Show this help message.
  -V, --version           Print version information.

Environment:
  RUST_LOG                Log filter when --debug is not given. Default: warn

Exit codes:
  0  Success.
  1  Input or configuration error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        max_passes = DEFAULT_MAX_PASSES
    )
}
