//! Keyboard input
//!
//! A reader thread turns input lines into [`Command`]s and hands them to the
//! game loop over a one-slot channel. While the machine is pulling the slot
//! stays full, so extra pull requests are dropped instead of queued.

use std::io::BufRead;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::debug;

use sm_core::ControlSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pull,
    Exit,
}

/// What happened to a forwarded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarded {
    Queued,
    Dropped,
    Closed,
}

/// Map an input line to a command; an empty line pulls
pub fn parse_command(line: &str, controls: &ControlSettings) -> Option<Command> {
    let input = line.trim();
    if input.eq_ignore_ascii_case(controls.exit.trim()) {
        Some(Command::Exit)
    } else if input.is_empty() || input.eq_ignore_ascii_case(controls.pull.trim()) {
        Some(Command::Pull)
    } else {
        None
    }
}

/// Pulls are offered, exit always gets through
pub fn forward(command: Command, tx: &Sender<Command>) -> Forwarded {
    match command {
        Command::Pull => match tx.try_send(command) {
            Ok(()) => Forwarded::Queued,
            Err(TrySendError::Full(_)) => Forwarded::Dropped,
            Err(TrySendError::Disconnected(_)) => Forwarded::Closed,
        },
        Command::Exit => match tx.send(command) {
            Ok(()) => Forwarded::Queued,
            Err(_) => Forwarded::Closed,
        },
    }
}

/// Start the reader thread; end of input counts as exit
pub fn spawn_reader<R>(reader: R, controls: ControlSettings) -> Receiver<Command>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let Some(command) = parse_command(&line, &controls) else {
                debug!("Ignoring input {line:?}");
                continue;
            };
            match forward(command, &tx) {
                Forwarded::Dropped => debug!("Pull request dropped, machine busy"),
                Forwarded::Closed => return,
                Forwarded::Queued if command == Command::Exit => return,
                Forwarded::Queued => {}
            }
        }
        forward(Command::Exit, &tx);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_command() {
        let controls = ControlSettings::default();
        assert_eq!(parse_command("", &controls), Some(Command::Pull));
        assert_eq!(parse_command("  p \n", &controls), Some(Command::Pull));
        assert_eq!(parse_command("P", &controls), Some(Command::Pull));
        assert_eq!(parse_command("q", &controls), Some(Command::Exit));
        assert_eq!(parse_command("Q", &controls), Some(Command::Exit));
        assert_eq!(parse_command("x", &controls), None);
    }

    #[test]
    fn test_custom_controls() {
        let controls = ControlSettings {
            pull: "spin".to_string(),
            exit: "quit".to_string(),
        };
        assert_eq!(parse_command("spin", &controls), Some(Command::Pull));
        assert_eq!(parse_command("quit", &controls), Some(Command::Exit));
        assert_eq!(parse_command("q", &controls), None);
    }

    #[test]
    fn test_extra_pulls_dropped() {
        let (tx, rx) = bounded(1);
        assert_eq!(forward(Command::Pull, &tx), Forwarded::Queued);
        assert_eq!(forward(Command::Pull, &tx), Forwarded::Dropped);
        assert_eq!(rx.recv().unwrap(), Command::Pull);
        assert_eq!(forward(Command::Pull, &tx), Forwarded::Queued);

        drop(rx);
        assert_eq!(forward(Command::Pull, &tx), Forwarded::Closed);
    }

    #[test]
    fn test_reader_stops_at_exit() {
        let input = Cursor::new("p\nhello\nq\np\n");
        let rx = spawn_reader(input, ControlSettings::default());
        let commands: Vec<Command> = rx.iter().collect();
        assert_eq!(commands, [Command::Pull, Command::Exit]);
    }

    #[test]
    fn test_end_of_input_exits() {
        let rx = spawn_reader(Cursor::new(""), ControlSettings::default());
        let commands: Vec<Command> = rx.iter().collect();
        assert_eq!(commands, [Command::Exit]);
    }
}
