use std::io::{stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use command_search_cli::cli_args::{Args, Mode};
use command_search_cli::command_selection::TerminalSelector;
use command_search_cli::workflow::{self, Interaction};
use command_search_core::clipboard::{self, SystemClipboard};
use command_search_core::config::{self, VERSION};
use command_search_core::error::Result;
use command_search_core::paste::{self, Platform};

fn execute() -> Result<()> {
    let args = Args::parse();
    // Usage errors are reported before any file is touched
    let mode = args.mode()?;

    let commands_path = config::get_commands_path(&args.commands_path)?;
    debug!("Version {VERSION}, commands path: `{}`", commands_path.display());

    match mode {
        Mode::Add {
            command,
            description,
        } => workflow::run_add(&commands_path, &command, &description, &mut stdout()),
        Mode::Interactive => {
            let platform = Platform::detect();
            debug!("Detected platform: {platform}");
            let injector = paste::injector_for(platform);

            let mut selector = TerminalSelector;
            let mut clipboard = SystemClipboard;
            let mut interaction = Interaction {
                selector: &mut selector,
                clipboard: &mut clipboard,
                injector: (!args.no_paste).then_some(injector.as_ref()),
                input: stdin().lock(),
                output: stdout(),
            };

            let outcome = workflow::run_interactive(&commands_path, &mut interaction)?;
            debug!("Finished with {outcome:?}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    if clipboard::is_clipboard_holder() {
        return match clipboard::hold_clipboard_from_stdin() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
