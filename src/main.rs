use anstyle::Style;
use anyhow::Context;
use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use std::io::Write;
use std::process;

use statls::Lister;
use statls::cli::{self, Cli};
use statls::config::StatlsConfig;
use statls::styling::{eprintln, get_terminal_width};
use statls::vcs::GitCli;

/// Exit code for a malformed invocation or configuration
const USAGE_EXIT_CODE: i32 = 2;

/// Map a clap parse failure to output and an exit code.
///
/// Unknown flags get a short, ls-style message and exit 1; help and version
/// exit 0; everything else keeps clap's message and exits 2.
fn parse_error_exit_code(err: clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        ErrorKind::UnknownArgument => {
            let flag = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(flag)) => flag.clone(),
                _ => String::new(),
            };
            eprintln!("statls: unrecognized option '{flag}'");
            eprintln!("{}", cli::usage());
            1
        }
        _ => {
            let _ = err.print();
            USAGE_EXIT_CODE
        }
    }
}

fn init_logging(verbose: bool) {
    // Configure logging based on --verbose flag or RUST_LOG env var
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "off" }),
    )
    .format(|buf, record| {
        let msg = record.args().to_string();
        let dim = Style::new().dimmed();

        // Commands start with $, make only the command bold (not $ or [dir])
        if let Some(rest) = msg.strip_prefix("$ ") {
            let bold = Style::new().bold();

            // Split: "git command [dir]" -> ("git command", " [dir]")
            if let Some(bracket_pos) = rest.find(" [") {
                let command = &rest[..bracket_pos];
                let dir = &rest[bracket_pos..];
                writeln!(buf, "{dim}[statls]{dim:#} $ {bold}{command}{bold:#}{dir}")
            } else {
                writeln!(buf, "{dim}[statls]{dim:#} $ {bold}{rest}{bold:#}")
            }
        } else if msg.starts_with("  ! ") {
            // Error output - show in red
            use anstyle::{AnsiColor, Color};
            let red = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
            writeln!(buf, "{dim}[statls]{dim:#} {red}{msg}{red:#}")
        } else {
            writeln!(buf, "{dim}[statls]{dim:#} {msg}")
        }
    })
    .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => process::exit(parse_error_exit_code(err)),
    };

    init_logging(cli.verbose);

    if cli.color {
        anstream::ColorChoice::Always.write_global();
    }

    let config = match StatlsConfig::load().context("Failed to load config") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("statls: {e:#}");
            process::exit(USAGE_EXIT_CODE);
        }
    };
    log::debug!("{config:?}");

    let options = cli.list_options(&config, get_terminal_width());
    let source = GitCli;
    let mut lister = Lister::new(&options, &source);

    let mut out = anstream::stdout().lock();
    let mut err = anstream::stderr().lock();
    let result = lister
        .run(&cli.paths, &mut out, &mut err)
        .and_then(|()| out.flush());

    if let Err(e) = result {
        // A closed pipe (e.g. `statls | head`) isn't worth reporting
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("statls: {e}");
            process::exit(1);
        }
    }

    log::debug!("{} errors", lister.failures());
    process::exit(lister.exit_code());
}
