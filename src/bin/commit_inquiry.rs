use std::{
    env, fs,
    path::PathBuf,
    process::{self, Command},
};

use commit_inquiry::{
    cli::{
        output::{self, OutputPreferences},
        ui::{terminal::TerminalHost, test_mode::ScriptedHost},
    },
    commit::{run_commit_wizard, ComposeOptions},
    config::ConfigManager,
    init,
    inquiry::PromptHost,
    utils::build_info,
};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    options: ComposeOptions,
    prefs: OutputPreferences,
}

fn main() {
    init();

    if let Err(err) = run() {
        output::error(format!("Error: {err}"));
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = parse_args()?;
    output::set_preferences(args.prefs);
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    if args.options.branch.is_none() {
        args.options.branch = current_branch();
    }
    output::info(format!("Configuration: {}", manager.path().display()));

    let mut scripted = ScriptedHost::from_env()?;
    let mut terminal = TerminalHost::new();
    let host: &mut dyn PromptHost = match scripted.as_mut() {
        Some(host) => host,
        None => &mut terminal,
    };

    match run_commit_wizard(host, &manager, &args.options)? {
        Some(message) => match &args.output {
            Some(path) => {
                fs::write(path, format!("{message}\n"))?;
                output::success(format!("Commit message written to {}", path.display()));
            }
            None => println!("{message}"),
        },
        None => output::warning("No commit message composed."),
    }
    Ok(())
}

fn parse_args() -> Result<Args, String> {
    let mut parsed = Args::default();
    parsed.prefs.plain_mode = env::var_os("NO_COLOR").is_some();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--output" | "-o" => parsed.output = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--preset" => parsed.options.preset = Some(value_for(&arg, args.next())?),
            "--branch" => parsed.options.branch = Some(value_for(&arg, args.next())?),
            "--plain" => parsed.prefs.plain_mode = true,
            "--quiet" | "-q" => parsed.prefs.quiet_mode = true,
            "--version" | "-V" => {
                println!("{}", build_info::current().summary());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                print_usage();
                return Err(format!("unexpected argument `{other}`"));
            }
        }
    }
    Ok(parsed)
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("`{flag}` expects a value"))
}

fn current_branch() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && name != "HEAD")
}

fn print_usage() {
    eprintln!(
        "Usage: commit_inquiry [options]\n\
         Options:\n  \
         --config <file.json>   composer configuration (default: user config dir)\n  \
         --preset <name>        skip the preset picker\n  \
         --branch <name>        branch for the `Branch:` trailer (default: git HEAD)\n  \
         --output, -o <file>    write the message to a file instead of stdout\n  \
         --plain                ASCII output without colors (also set by NO_COLOR)\n  \
         --quiet, -q            only print warnings and errors\n  \
         --version, -V          print build information\n  \
         --help, -h             print this help"
    );
}
