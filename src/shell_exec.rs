//! External command execution
//!
//! Every external command (today only `git`) goes through [`run`] so logging
//! and timing stay consistent. Commands run synchronously with no timeout.

use std::process::Command;
use std::time::Instant;

/// Execute a command with timing and debug logging.
///
/// ```text
/// $ git status --porcelain -z [/path/to/dir]   # with context
/// [statls-trace] context=/path/to/dir cmd="..." dur=12.3ms ok=true
/// ```
///
/// The `context` parameter is typically the directory the command runs in.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<std::process::Output> {
    let cmd_str = command_line(cmd);

    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let context = context
        .map(|ctx| format!("context={ctx} "))
        .unwrap_or_default();
    match &result {
        Ok(output) => log::debug!(
            "[statls-trace] {}cmd=\"{}\" dur={:.1}ms ok={}",
            context,
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[statls-trace] {}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            context,
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}

fn command_line(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
