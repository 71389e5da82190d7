//! REPL Module
//!
//! Reads commands line by line, dispatches them to the session and prints
//! results.
//!
//! # Commands
//! - `help`, `exit`
//! - `map`, `mapb` - Page forward/back through location areas
//! - `explore <area>` - List Pokemon found in an area
//! - `catch <pokemon>`, `inspect <pokemon>`, `pokedex`

mod catch;
mod commands;
mod input;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::{PokedexError, Result};

pub use catch::catch_chance;
pub use commands::{help_text, Command};
pub use input::clean_input;
pub use session::{CaughtPokemon, Flow, MapPagination, PageCursor, Session};

pub const PROMPT: &str = "Pokedex > ";

const UNKNOWN_COMMAND: &str = "Please provide a supported command. Try `help` if you don't know them!";

/// Runs the read-eval-print loop until `exit` or end of input.
///
/// Command failures and undecodable lines are printed and the loop continues;
/// only I/O errors on `input` or `out` end it early.
pub async fn run<R, W>(session: &mut Session, mut input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            writeln!(out)?;
            debug!("End of input, leaving REPL");
            return Ok(());
        }

        // Invalid UTF-8 becomes U+FFFD and falls through as an unknown command
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(&['\n', '\r'][..]);

        if let Flow::Exit = eval_line(session, line, out).await? {
            return Ok(());
        }
    }
}

/// Evaluates a single line of input.
pub async fn eval_line<W: Write>(session: &mut Session, line: &str, out: &mut W) -> Result<Flow> {
    let tokens = clean_input(line);
    let Some(name) = tokens.first() else {
        return Ok(Flow::Continue);
    };

    let Some(command) = Command::from_name(name) else {
        writeln!(out, "{}", UNKNOWN_COMMAND)?;
        return Ok(Flow::Continue);
    };

    let arg = tokens.get(1).map(String::as_str);
    match session.execute(command, arg, out).await {
        Ok(flow) => Ok(flow),
        Err(PokedexError::Io(e)) => Err(PokedexError::Io(e)),
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(Flow::Continue)
        }
    }
}
