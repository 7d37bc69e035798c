//! Interrupt handling.
//!
//! The throbber hides the cursor while it animates. If the process is
//! interrupted mid-animation the `Drop` cleanup never runs, so the SIGINT
//! handler puts the cursor back before exiting.

use std::io::{self, Write};

use crate::error::{IssuefmtError, Result};
use crate::throbber::{self, SHOW_CURSOR};

/// Exit status for termination by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Register the SIGINT handler. Only one handler can be registered per
/// process; a second call returns an error.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(interrupt_output(throbber::is_active()).as_bytes());
        let _ = stdout.flush();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .map_err(|e| IssuefmtError::SignalHandler(e.to_string()))
}

/// What to write on interrupt: the cursor-show sequence when a throbber
/// was animating, and a newline so the shell prompt starts clean.
fn interrupt_output(throbbing: bool) -> String {
    if throbbing {
        format!("{}\n", SHOW_CURSOR)
    } else {
        "\n".to_string()
    }
}
