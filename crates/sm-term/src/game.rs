//! Interactive play loop

use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::{debug, info};

use sm_core::{Machine, MachineConfig, PullResult};

use crate::input::{self, Command};
use crate::terminal::TerminalPresenter;

/// Drive `machine` from `commands` until exit; returns the number of pulls
pub fn run<W: Write>(
    machine: &mut Machine,
    presenter: &mut TerminalPresenter<W>,
    commands: &Receiver<Command>,
) -> u64 {
    machine.start(presenter);

    let mut pulls = 0;
    for command in commands.iter() {
        match command {
            Command::Pull => match machine.pull(presenter) {
                PullResult::Completed(_) => pulls += 1,
                PullResult::Ignored => debug!("Pull ignored"),
            },
            Command::Exit => break,
        }
    }

    info!("Exiting...");
    presenter.show_summary(machine.stats(), machine.ledger());
    pulls
}

/// Play on stdin/stdout
pub fn play(config: &MachineConfig, seed: Option<u64>) -> Result<()> {
    let mut machine = match seed {
        Some(seed) => Machine::with_seed(config, seed),
        None => Machine::from_config(config),
    }
    .context("Failed to build the machine")?;

    let stdout = io::stdout();
    let mut presenter = TerminalPresenter::new(stdout.lock(), &config.display, &config.controls);
    let commands = input::spawn_reader(BufReader::new(io::stdin()), config.controls.clone());

    let pulls = run(&mut machine, &mut presenter, &commands);
    info!("Session ended after {pulls} pulls, balance ${}", machine.ledger().balance());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use sm_core::{ControlSettings, DisplaySettings};

    #[test]
    fn test_run_until_exit() {
        let mut config = MachineConfig::default();
        config.machine.min_pull_cycles = 1;
        config.machine.max_pull_cycles = 2;
        let mut machine = Machine::with_seed(&config, 3).unwrap();
        let display = DisplaySettings {
            frame_delay_ms: 0,
            color: false,
        };
        let mut presenter = TerminalPresenter::new(Vec::new(), &display, &ControlSettings::default());

        let (tx, rx) = unbounded();
        for command in [Command::Pull, Command::Pull, Command::Exit, Command::Pull] {
            tx.send(command).unwrap();
        }

        assert_eq!(run(&mut machine, &mut presenter, &rx), 2);
        assert_eq!(machine.stats().pulls, 2);
        assert!(!machine.is_busy());

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(text.contains("Pulls: 2"));
        assert!(text.contains("Thanks for playing!"));
    }
}
