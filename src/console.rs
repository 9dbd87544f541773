//! Line commands read from stdin while the updater runs

use std::io::BufRead;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::controller::{Controller, PickResult};
use crate::output::{documents_text, settings_text};

const HELP: &str = "\
Commands:
  show               print the current settings
  note <path>        set the note to update (empty clears)
  pick <query>       choose the note by name
  list [query]       list notes in the vault
  format <pattern>   set the date pattern (empty resets)
  interval <secs>    set the update interval
  timezone <tz>      set the timezone (\"local\" resets)
  tick               update the note now
  start | stop       resume or pause automatic updates
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsoleCommand {
    Show,
    Note(String),
    Pick(String),
    List(String),
    Format(String),
    Interval(String),
    Timezone(String),
    Tick,
    Start,
    Stop,
    Help,
    Quit,
}

/// `Ok(None)` for blank lines
pub(crate) fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim().to_string()),
        None => (line, String::new()),
    };

    let command = match word.to_lowercase().as_str() {
        "show" => ConsoleCommand::Show,
        "note" => ConsoleCommand::Note(arg),
        "pick" => ConsoleCommand::Pick(arg),
        "list" | "ls" => ConsoleCommand::List(arg),
        "format" => ConsoleCommand::Format(arg),
        "interval" => ConsoleCommand::Interval(arg),
        "timezone" | "tz" => ConsoleCommand::Timezone(arg),
        "tick" => ConsoleCommand::Tick,
        "start" => ConsoleCommand::Start,
        "stop" => ConsoleCommand::Stop,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("Unknown command \"{other}\" (try \"help\")")),
    };
    Ok(Some(command))
}

/// Apply a command and return the text to show
pub(crate) fn execute(controller: &mut Controller, command: ConsoleCommand) -> String {
    let result = match command {
        ConsoleCommand::Show => Ok(settings_text(
            &controller.configuration(),
            controller.settings_file(),
            Some(controller.scheduler_state()),
        )),
        ConsoleCommand::Note(path) => controller
            .set_note_path(&path)
            .map(|()| format!("Note set to \"{}\"", controller.configuration().note_path)),
        ConsoleCommand::Pick(query) => controller.pick(&query).map(|picked| match picked {
            PickResult::Selected(path) => format!("Note set to \"{path}\""),
            PickResult::Ambiguous(paths) => {
                format!("Several notes match, be more specific:\n  {}", paths.join("\n  "))
            }
        }),
        ConsoleCommand::List(query) => Ok(documents_text(
            &controller.documents(&query),
            &controller.configuration().note_path,
        )),
        ConsoleCommand::Format(pattern) => controller
            .set_format(&pattern)
            .map(|()| format!("Format set to \"{}\"", controller.configuration().format)),
        ConsoleCommand::Interval(raw) => controller.set_interval(&raw).map(|()| {
            format!(
                "Interval set to {}s",
                controller.configuration().update_interval_seconds
            )
        }),
        ConsoleCommand::Timezone(raw) => controller.set_timezone(&raw).map(|()| {
            let timezone = controller.configuration().timezone;
            format!("Timezone set to {}", timezone.as_deref().unwrap_or("local"))
        }),
        ConsoleCommand::Tick => Ok(controller.tick_now().to_string()),
        ConsoleCommand::Start => {
            controller.start();
            Ok("Automatic updates running".to_string())
        }
        ConsoleCommand::Stop => {
            controller.stop();
            Ok("Automatic updates paused".to_string())
        }
        ConsoleCommand::Help => Ok(HELP.to_string()),
        ConsoleCommand::Quit => Ok(String::new()),
    };
    result.unwrap_or_else(|e| e.to_string())
}

/// Forward stdin lines from a plain thread. The runtime never waits on a
/// blocking read, so Ctrl-C exits immediately.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "cannot start stdin reader");
    }
    rx
}

/// Serve commands until `quit` or Ctrl-C. A closed stdin keeps the updater
/// running until interrupted.
pub(crate) async fn run(controller: &mut Controller) {
    let mut lines = spawn_stdin_reader();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
            line = lines.recv(), if stdin_open => match line {
                Some(Ok(line)) => match parse_line(&line) {
                    Ok(Some(ConsoleCommand::Quit)) => break,
                    Ok(Some(command)) => println!("{}", execute(controller, command)),
                    Ok(None) => {}
                    Err(message) => println!("{message}"),
                },
                Some(Err(e)) => {
                    warn!(error = %e, "cannot read stdin, running until interrupted");
                    stdin_open = false;
                }
                None => {
                    debug!("stdin closed, running until interrupted");
                    stdin_open = false;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, SettingsFile};
    use crate::vault::memory::MemoryVault;
    use std::sync::Arc;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_line("  format  YYYY-MM-DD HH:mm ").unwrap(),
            Some(ConsoleCommand::Format("YYYY-MM-DD HH:mm".to_string()))
        );
        assert_eq!(
            parse_line("NOTE journal/today.md").unwrap(),
            Some(ConsoleCommand::Note("journal/today.md".to_string()))
        );
        assert_eq!(
            parse_line("list").unwrap(),
            Some(ConsoleCommand::List(String::new()))
        );
        assert_eq!(parse_line("exit").unwrap(), Some(ConsoleCommand::Quit));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_line("   ").unwrap(), None);
        let err = parse_line("frobnicate 3").unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn execute_reports_errors_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::at(dir.path().join("settings.toml"));
        let vault = Arc::new(MemoryVault::with_note("daily.md", ""));
        let mut controller = Controller::new(Settings::default(), file, vault);

        let reply = execute(&mut controller, ConsoleCommand::Interval("0".to_string()));
        assert!(reply.starts_with("Invalid update interval"));
        assert_eq!(controller.configuration().update_interval_seconds, 60);

        let reply = execute(&mut controller, ConsoleCommand::Pick("daily".to_string()));
        assert_eq!(reply, "Note set to \"daily.md\"");

        let reply = execute(&mut controller, ConsoleCommand::List(String::new()));
        assert_eq!(reply, "* daily.md");
    }
}
