use crate::jobs::JobSupervisor;
use crate::parser::CommandSpec;
use nix::unistd;
use std::path::PathBuf;
use std::process;

/// Checks if the command is a built-in and, if so, executes it.
/// Supported built-ins are "exit", "cd", and "status".
/// Returns true if the command was built-in and handled; false otherwise.
pub fn handle_builtin(cmd: &CommandSpec, supervisor: &JobSupervisor) -> bool {
    match cmd.program() {
        "exit" => {
            // Outstanding background children are left running; they get
            // reparented to init rather than killed.
            println!("exiting shell");
            process::exit(0);
        }
        "cd" => {
            change_directory(cmd.argv.get(1).map(String::as_str));
            true
        }
        "status" => {
            println!("{}", supervisor.last_foreground());
            true
        }
        _ => false,
    }
}

/// `cd` with no argument goes to the user's home directory.
fn change_directory(target: Option<&str>) {
    let dir = match target {
        Some(path) => PathBuf::from(path),
        None => match dirs_next::home_dir() {
            Some(home) => home,
            None => {
                eprintln!("cd: cannot determine home directory");
                return;
            }
        },
    };
    if let Err(err) = unistd::chdir(&dir) {
        eprintln!("cd: {}: {}", dir.display(), err.desc());
    }
}
