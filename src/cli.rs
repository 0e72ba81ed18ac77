use chrono::Local;
use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::StatlsConfig;
use crate::options::{HiddenFiles, LayoutMode, ListOptions, RenderOptions, SizeFormat};

/// Custom styles for help output
fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
}

/// Help template
const HELP_TEMPLATE: &str = "\
{before-help}{name} - {about-with-newline}\
Usage: {usage}

{all-args}{after-help}";

/// Build the clap Command with the shared help template applied.
pub fn build_command() -> clap::Command {
    Cli::command().help_template(HELP_TEMPLATE)
}

/// Usage line printed after invocation errors
pub fn usage() -> String {
    build_command().render_usage().to_string()
}

#[derive(Parser, Debug)]
#[command(name = "statls")]
#[command(about = "List directory contents with git status", long_about = None)]
#[command(version)]
#[command(styles = help_styles())]
#[command(disable_help_flag = true)]
#[command(
    after_long_help = r#"Defaults can be set in $XDG_CONFIG_HOME/statls/config.toml (override with STATLS_CONFIG_PATH)."#
)]
pub struct Cli {
    /// List one entry per line
    #[arg(short = '1')]
    pub one_per_line: bool,

    /// Include entries starting with `.`, including `.` and `..`
    #[arg(short = 'a', short_alias = 'f', overrides_with = "almost_all")]
    pub all: bool,

    /// Like -a, but without `.` and `..`
    #[arg(short = 'A', overrides_with = "all")]
    pub almost_all: bool,

    /// Long format without the owner column
    #[arg(short = 'g')]
    pub no_owner: bool,

    /// Colorize names and status badges
    #[arg(short = 'G')]
    pub color: bool,

    /// Follow symlinks given on the command line
    #[arg(short = 'H', overrides_with = "no_follow")]
    pub follow: bool,

    /// Don't follow symlinks given on the command line (default)
    #[arg(short = 'P', overrides_with = "follow")]
    pub no_follow: bool,

    /// Human-readable sizes (1.5K, 2.0M)
    #[arg(short = 'h')]
    pub human: bool,

    /// Show inode numbers
    #[arg(short = 'i')]
    pub inode: bool,

    /// Long format
    #[arg(short = 'l')]
    pub long: bool,

    /// Numeric user and group ids
    #[arg(short = 'n')]
    pub numeric: bool,

    /// Long format without the group column
    #[arg(short = 'o')]
    pub no_group: bool,

    /// Show allocated block counts
    #[arg(short = 's')]
    pub blocks: bool,

    /// Show git commands and debug info
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,

    /// Files and directories to list
    #[arg(default_value = ".", value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// Combine flags with the loaded configuration. Flags win.
    pub fn list_options(&self, config: &StatlsConfig, terminal_width: usize) -> ListOptions {
        let long = self.long || self.no_owner || self.no_group;
        let hidden = if self.all {
            HiddenFiles::All
        } else if self.almost_all {
            HiddenFiles::AlmostAll
        } else {
            HiddenFiles::Skip
        };
        let size_format = match (self.human, config.compact_sizes) {
            (false, _) => SizeFormat::Bytes,
            (true, false) => SizeFormat::Human,
            (true, true) => SizeFormat::HumanCompact,
        };
        let mode = if long {
            LayoutMode::Long
        } else if self.one_per_line {
            LayoutMode::SingleColumn
        } else {
            LayoutMode::Grid {
                width: terminal_width,
            }
        };

        ListOptions {
            hidden,
            follow_args: self.follow,
            inode: self.inode,
            blocks: self.blocks,
            no_owner: self.no_owner,
            no_group: self.no_group,
            time_field: config.time_field,
            vcs: config.vcs,
            mode,
            render: RenderOptions {
                numeric_ids: self.numeric,
                size_format,
                show_link_targets: long && config.show_link_targets,
                color: self.color,
                now: Local::now(),
                margin_width: config.margin_width,
            },
        }
    }
}
