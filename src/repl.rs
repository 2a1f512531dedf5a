//! Interactive line editing for terminal sessions.

use std::io::{self, Write};

use anyhow::Result;
use pagedb::{Database, LineOutcome, ReplConfig};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode, Editor};
use tracing::{debug, error};

/// Run the interpreter on a terminal until `.exit` or end of input
pub fn run_interactive(db: &mut Database, config: &ReplConfig) -> Result<()> {
    let rl_config = Config::builder()
        .history_ignore_space(true)
        .edit_mode(EditMode::Emacs)
        .max_history_size(config.history_size)?
        .build();

    let mut editor: DefaultEditor = Editor::with_config(rl_config)?;

    if let Some(path) = config.history_file.as_ref().filter(|p| p.exists()) {
        if let Err(e) = editor.load_history(path) {
            debug!("Failed to load history: {}", e);
        }
    }

    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        debug!("Failed to add history entry: {}", e);
                    }
                }

                let mut out = io::stdout().lock();
                let outcome = db.run_line(&line, &mut out)?;
                out.flush()?;

                if outcome == LineOutcome::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Drop the current line, keep the session
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                error!("Readline error: {}", e);
                return Err(e.into());
            }
        }
    }

    if let Some(path) = &config.history_file {
        if let Err(e) = editor.save_history(path) {
            debug!("Failed to save history: {}", e);
        }
    }

    Ok(())
}
