use crate::parser::CommandSpec;
use crate::redirect;
use crate::signals;
use nix::errno::Errno;
use nix::unistd::{self, ForkResult, Pid};
use std::ffi::{CStr, CString};
use std::process;

/// Launches an external command. Forks once; the child configures its
/// signal dispositions and redirection and then replaces itself with the
/// target program, while the parent gets the child's pid back immediately
/// and never blocks here.
///
/// `background` is the effective placement, after foreground-only mode has
/// been taken into account by the dispatcher.
///
/// An `Err` means no child exists (the fork itself failed).
pub fn spawn_command(cmd: &CommandSpec, background: bool) -> nix::Result<Pid> {
    // Build the exec arguments up front so the child does as little as
    // possible between fork and exec. The parser rejects NUL bytes, so
    // the conversions only fail on lines that never reach dispatch.
    let program = CString::new(cmd.program()).map_err(|_| Errno::EINVAL)?;
    let argv: Vec<CString> = cmd
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<_, _>>()
        .map_err(|_| Errno::EINVAL)?;

    match unsafe { unistd::fork() }? {
        ForkResult::Child => run_child(cmd, background, &program, &argv),
        ForkResult::Parent { child } => Ok(child),
    }
}

/// The child side, from fork to exec. Never returns: on success the
/// process image is replaced, and any failure exits this child with a
/// status the parent can observe -- 1 for setup failures, 2 when the exec
/// itself failed. Nothing here unwinds back into the shell.
fn run_child(cmd: &CommandSpec, background: bool, program: &CStr, argv: &[CString]) -> ! {
    if let Err(err) = signals::apply_child_dispositions(background) {
        eprintln!("cannot set signal dispositions: {}", err);
        process::exit(1);
    }

    // A background command must not touch the terminal unless the user
    // redirected the stream explicitly.
    let stdin_target = cmd
        .infile
        .as_deref()
        .or(background.then_some(redirect::DEV_NULL));
    let stdout_target = cmd
        .outfile
        .as_deref()
        .or(background.then_some(redirect::DEV_NULL));

    if let Some(path) = stdin_target {
        if let Err(err) = redirect::redirect_stdin(path) {
            eprintln!("cannot open {} for input: {}", path, err.desc());
            process::exit(1);
        }
    }
    if let Some(path) = stdout_target {
        if let Err(err) = redirect::redirect_stdout(path) {
            eprintln!("cannot open {} for output: {}", path, err.desc());
            process::exit(1);
        }
    }

    match unistd::execvp(program, argv) {
        Ok(_) => unreachable!(),
        Err(err) => {
            eprintln!("{}: {}", cmd.program(), err.desc());
            process::exit(2);
        }
    }
}
