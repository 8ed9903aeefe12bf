use crate::builtins::handle_builtin;
use crate::jobs::JobSupervisor;
use crate::parser::parse_command_line;
use nix::unistd::{self, Pid};
use once_cell::sync::Lazy;
use std::io::{self, Write};

/// Prompt token printed before each command is read.
pub static PROMPT: &str = ": ";

/// The shell's own pid, fixed for the life of the process; `$$` in a
/// command line expands to it.
static SHELL_PID: Lazy<Pid> = Lazy::new(unistd::getpid);

/// Runs the main shell loop: sweeps finished background children, prints
/// the prompt (if enabled), reads input, parses it, and dispatches the
/// command.
///
/// - `emit_prompt`: if true, prints the command prompt.
/// - `verbose`: if true, echoes every accepted command line.
pub fn run_shell(emit_prompt: bool, verbose: bool) {
    let mut supervisor = JobSupervisor::new();

    loop {
        // Surface background completions before taking the next command.
        supervisor.reap_background();

        if emit_prompt {
            print!("{}", PROMPT);
            io::stdout().flush().unwrap();
        }

        let mut cmdline = String::new();
        match io::stdin().read_line(&mut cmdline) {
            Ok(0) => break, // End-of-file (Ctrl-D)
            Ok(_) => {
                if verbose {
                    println!("Received command: {}", cmdline.trim());
                }
                match parse_command_line(&cmdline, *SHELL_PID) {
                    Ok(Some(cmd)) => {
                        if !handle_builtin(&cmd, &supervisor) {
                            supervisor.run_command(&cmd);
                        }
                    }
                    Ok(None) => continue, // blank line or comment
                    Err(e) => eprintln!("parse error: {}", e),
                }
            }
            Err(e) => {
                eprintln!("error reading input: {}", e);
                break;
            }
        }
    }
}
