//! Command-line interface for micrograft
//!
//! Applies pattern-guided rewrites to a source tree.
//!
//! Usage:
//!   micrograft wrap-try `<path>` --config `<config.yaml>` [--glob `<pattern>`...] [--dry-run]
//!   micrograft rename-method `<path>` --old `<name>` --new `<name>` [--glob `<pattern>`...] [--dry-run]
//!   micrograft scan `<path>` --begin `<literal>` --end `<literal>` [--glob `<pattern>`...] [--format `<format>`]

use clap::{Arg, ArgAction, ArgMatches, Command};
use micrograft::grammar::java::unsafe_call;
use micrograft::matching::find_matches;
use micrograft::rewrite::{Project, TransformReport};
use micrograft::transforms::{
    rename_method, wrap_in_try, RenameMethodOptions, WrapInTryOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("micrograft")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pattern-guided source rewriting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("wrap-try")
                .about("Wrap unguarded calls in try/finally")
                .arg(
                    Arg::new("path")
                        .help("Root of the source tree")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("YAML file with wrap-try options")
                        .required(true),
                )
                .arg(glob_arg())
                .arg(dry_run_arg()),
        )
        .subcommand(
            Command::new("rename-method")
                .about("Rename a method at its call sites")
                .arg(
                    Arg::new("path")
                        .help("Root of the source tree")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("old")
                        .long("old")
                        .help("Current method name")
                        .required(true),
                )
                .arg(
                    Arg::new("new")
                        .long("new")
                        .help("New method name")
                        .required(true),
                )
                .arg(glob_arg())
                .arg(dry_run_arg()),
        )
        .subcommand(
            Command::new("scan")
                .about("List call sites matching a fluent-call grammar, without editing")
                .arg(
                    Arg::new("path")
                        .help("Root of the source tree")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("begin")
                        .long("begin")
                        .help("Literal beginning of the call, e.g. 'client.get('")
                        .required(true),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .help("Literal end of the call, e.g. 'execute()'")
                        .required(true),
                )
                .arg(glob_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("wrap-try", sub)) => handle_wrap_try(sub),
        Some(("rename-method", sub)) => handle_rename_method(sub),
        Some(("scan", sub)) => handle_scan(sub),
        _ => unreachable!(),
    }
}

fn glob_arg() -> Arg {
    Arg::new("glob")
        .long("glob")
        .short('g')
        .help("Glob pattern for files to include, e.g. '**/*.java' (repeatable)")
        .action(ArgAction::Append)
}

fn dry_run_arg() -> Arg {
    Arg::new("dry-run")
        .long("dry-run")
        .help("Report what would change without writing files")
        .action(ArgAction::SetTrue)
}

/// wrap-try configuration file contents.
#[derive(Debug, Deserialize)]
struct WrapTryConfig {
    #[serde(flatten)]
    options: WrapInTryOptions,
    /// Cleanup statement template; `$response` is replaced with the
    /// response variable name.
    finally: String,
}

fn handle_wrap_try(args: &ArgMatches) {
    let root = PathBuf::from(args.get_one::<String>("path").unwrap());
    let config_path = args.get_one::<String>("config").unwrap();
    let globs = collect_globs(args);
    let dry_run = args.get_flag("dry-run");

    let config_text = std::fs::read_to_string(config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", config_path, e);
        process::exit(1);
    });
    let config: WrapTryConfig = serde_yaml::from_str(&config_text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {}", config_path, e);
        process::exit(1);
    });

    let mut project = load_project(&root, &globs);
    let finally = config.finally.clone();
    let report = wrap_in_try(&mut project, &config.options, |var| {
        finally.replace("$response", var)
    })
    .unwrap_or_else(|e| {
        eprintln!("Grammar error: {}", e);
        process::exit(1);
    });

    finish(&root, &project, &report, dry_run);
}

fn handle_rename_method(args: &ArgMatches) {
    let root = PathBuf::from(args.get_one::<String>("path").unwrap());
    let options = RenameMethodOptions {
        old_method_name: args.get_one::<String>("old").unwrap().clone(),
        new_method_name: args.get_one::<String>("new").unwrap().clone(),
    };
    let globs = collect_globs(args);
    let dry_run = args.get_flag("dry-run");

    let mut project = load_project(&root, &globs);
    let report = rename_method(&mut project, &options).unwrap_or_else(|e| {
        eprintln!("Grammar error: {}", e);
        process::exit(1);
    });

    finish(&root, &project, &report, dry_run);
}

/// One match found by the scan command.
#[derive(Debug, Serialize)]
struct ScanHit {
    path: String,
    start: usize,
    end: usize,
    matched: String,
}

fn handle_scan(args: &ArgMatches) {
    let root = PathBuf::from(args.get_one::<String>("path").unwrap());
    let begin = args.get_one::<String>("begin").unwrap();
    let end = args.get_one::<String>("end").unwrap();
    let format = args.get_one::<String>("format").unwrap();
    let globs = collect_globs(args);

    let grammar = unsafe_call(begin, end).unwrap_or_else(|e| {
        eprintln!("Grammar error: {}", e);
        process::exit(1);
    });

    let project = load_project(&root, &globs);
    let mut hits = Vec::new();
    for path in project.paths() {
        let Some(text) = project.file(path) else {
            continue;
        };
        for m in find_matches(&grammar, text) {
            hits.push(ScanHit {
                path: path.to_string(),
                start: m.span.start,
                end: m.span.end,
                matched: m.matched,
            });
        }
    }

    match format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&hits).unwrap_or_else(|e| {
                eprintln!("Error rendering report: {}", e);
                process::exit(1);
            });
            println!("{}", rendered);
        }
        _ => {
            for hit in &hits {
                println!("{}:{}..{}", hit.path, hit.start, hit.end);
                for line in hit.matched.lines() {
                    println!("    {}", line);
                }
            }
            println!("{} match(es)", hits.len());
        }
    }
}

fn collect_globs(args: &ArgMatches) -> Vec<String> {
    args.get_many::<String>("glob")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn load_project(root: &Path, globs: &[String]) -> Project {
    Project::discover(root, globs).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", root.display(), e);
        process::exit(1);
    })
}

fn finish(root: &Path, project: &Project, report: &TransformReport, dry_run: bool) {
    for path in report.edited_paths() {
        println!("edited: {}", path);
    }
    for outcome in &report.outcomes {
        if let Some(error) = &outcome.error {
            eprintln!("failed: {}: {}", outcome.path, error);
        }
    }
    if report.edited && !dry_run {
        match project.flush(root) {
            Ok(written) => tracing::info!("wrote {} file(s)", written),
            Err(e) => {
                eprintln!("Error writing files: {}", e);
                process::exit(1);
            }
        }
    }
    if !report.edited {
        println!("nothing to change");
    }
    if !report.success() {
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
