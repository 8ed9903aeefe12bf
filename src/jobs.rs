use crate::exec;
use crate::parser::CommandSpec;
use crate::signals;
use crate::utils;
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::collections::HashSet;
use std::fmt;

/// Decoded termination status of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The child exited on its own with this code.
    Exited(i32),
    /// The child was terminated by this signal.
    Signaled(i32),
}

impl ExitOutcome {
    /// Decodes a raw wait status. Returns `None` for statuses that do not
    /// mean the child is gone (stopped, continued, still alive).
    fn decode(status: WaitStatus) -> Option<(Pid, ExitOutcome)> {
        match status {
            WaitStatus::Exited(pid, code) => Some((pid, ExitOutcome::Exited(code))),
            WaitStatus::Signaled(pid, sig, _) => Some((pid, ExitOutcome::Signaled(sig as i32))),
            _ => None,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exit value {}", code),
            ExitOutcome::Signaled(sig) => write!(f, "terminated by signal {}", sig),
        }
    }
}

/// Tracks every child the shell has spawned but not yet reaped: at most
/// one foreground child, waited on synchronously, and any number of
/// background children, collected by the per-iteration sweep.
pub struct JobSupervisor {
    background: HashSet<Pid>,
    last_foreground: ExitOutcome,
}

impl JobSupervisor {
    pub fn new() -> Self {
        JobSupervisor {
            background: HashSet::new(),
            last_foreground: ExitOutcome::Exited(0),
        }
    }

    /// Outcome of the most recent foreground command. Background
    /// completions never show up here.
    pub fn last_foreground(&self) -> ExitOutcome {
        self.last_foreground
    }

    /// Number of background children not yet reaped.
    pub fn background_count(&self) -> usize {
        self.background.len()
    }

    /// Runs one external command. The background request is honored only
    /// while foreground-only mode is off; the mode is read once, here, and
    /// a toggle arriving after the fork does not reclassify the command.
    ///
    /// A failed fork ends the shell: it cannot do its one job without the
    /// ability to spawn processes.
    pub fn run_command(&mut self, cmd: &CommandSpec) {
        let background = cmd.background && !signals::foreground_only();
        let child = match exec::spawn_command(cmd, background) {
            Ok(pid) => pid,
            Err(err) => utils::fatal(&format!("fork: {}", err.desc())),
        };

        if background {
            println!("background pid is {}", child);
            self.background.insert(child);
        } else {
            self.wait_foreground(child);
        }
    }

    /// Blocks until the foreground child is gone, then records its
    /// outcome. A signal-terminated child is announced right away; a plain
    /// exit is only surfaced later, on demand, by the `status` built-in.
    fn wait_foreground(&mut self, child: Pid) {
        loop {
            match waitpid(child, None) {
                Ok(status) => match ExitOutcome::decode(status) {
                    Some((_, outcome)) => {
                        self.last_foreground = outcome;
                        if let ExitOutcome::Signaled(_) = outcome {
                            println!("{}", outcome);
                        }
                        return;
                    }
                    None => continue,
                },
                Err(Errno::EINTR) => continue,
                Err(err) => {
                    eprintln!("wait on foreground child failed: {}", err.desc());
                    return;
                }
            }
        }
    }

    /// Non-blocking sweep over finished background children. Every
    /// completion found is announced and dropped from the tracked set; the
    /// sweep stops the moment nothing further has finished, so it never
    /// blocks and never reports a child twice.
    pub fn reap_background(&mut self) {
        loop {
            match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) => return,
                Ok(status) => {
                    if let Some((pid, outcome)) = ExitOutcome::decode(status) {
                        self.background.remove(&pid);
                        println!("background pid {} is done: {}", pid, outcome);
                    }
                }
                // No children at all is the usual idle case, not an error.
                Err(Errno::ECHILD) => return,
                Err(err) => {
                    eprintln!("background reap failed: {}", err.desc());
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;

    #[test]
    fn decode_exited_status() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            ExitOutcome::decode(WaitStatus::Exited(pid, 1)),
            Some((pid, ExitOutcome::Exited(1)))
        );
    }

    #[test]
    fn decode_signaled_status() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            ExitOutcome::decode(WaitStatus::Signaled(pid, Signal::SIGTERM, false)),
            Some((pid, ExitOutcome::Signaled(15)))
        );
    }

    #[test]
    fn non_terminal_statuses_decode_to_none() {
        assert_eq!(ExitOutcome::decode(WaitStatus::StillAlive), None);
        assert_eq!(
            ExitOutcome::decode(WaitStatus::Stopped(Pid::from_raw(42), Signal::SIGTSTP)),
            None
        );
    }

    #[test]
    fn outcome_formatting() {
        assert_eq!(ExitOutcome::Exited(0).to_string(), "exit value 0");
        assert_eq!(ExitOutcome::Exited(1).to_string(), "exit value 1");
        assert_eq!(ExitOutcome::Signaled(2).to_string(), "terminated by signal 2");
    }

    #[test]
    fn supervisor_starts_clean() {
        let supervisor = JobSupervisor::new();
        assert_eq!(supervisor.last_foreground(), ExitOutcome::Exited(0));
        assert_eq!(supervisor.background_count(), 0);
    }
}
