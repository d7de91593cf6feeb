use crate::mode::{Mode, ModeMailbox, ModeSet};
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Mode requested by one line of input: its first non-blank character as a mode key
pub fn parse_mode_line(line: &str, modes: ModeSet) -> Option<Mode> {
    line.trim().chars().next().and_then(|c| modes.key_mode(c))
}

/// Read lines until end of input, posting each recognised mode to `mailbox`.
/// Returns the number of modes posted.
pub fn listen_for_modes<R: BufRead>(reader: R, mailbox: &ModeMailbox, modes: ModeSet) -> usize {
    let mut posted = 0;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stdin mode listener read error: {}", e);
                break;
            }
        };

        match parse_mode_line(&line, modes) {
            Some(mode) => {
                debug!("Stdin requested mode {:?}", mode);
                mailbox.post(mode);
                posted += 1;
            }
            None => debug!("Ignoring stdin line {:?}", line),
        }
    }

    posted
}

/// Start the background listener on line-buffered stdin.
///
/// The thread lives for the rest of the process. It is never joined; shutdown
/// abandons it while it waits on the next line.
pub fn spawn_stdin_listener(mailbox: ModeMailbox, modes: ModeSet) -> io::Result<JoinHandle<()>> {
    info!("Starting stdin mode listener - type 1, 2 or 3 and press Enter");

    thread::Builder::new()
        .name("stdin-mode-listener".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            let posted = listen_for_modes(stdin.lock(), &mailbox, modes);
            debug!("Stdin closed after {} mode requests", posted);
        })
}
