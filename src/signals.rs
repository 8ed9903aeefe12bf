use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::unistd;
use signal_hook::consts::signal::SIGTSTP;
use signal_hook::low_level;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide foreground-only mode. Written by the SIGTSTP handler only;
/// every other context just reads it.
static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

const ENTER_NOTICE: &[u8] = b"Entering foreground-only mode (& is now ignored)\n";
const EXIT_NOTICE: &[u8] = b"Exiting foreground-only mode\n";

/// Installs the shell's own signal dispositions:
///
/// - SIGINT (Ctrl-C) is ignored. The ignore disposition is inherited across
///   both fork and exec, which is what keeps the shell and its background
///   children immune without any post-exec work.
/// - SIGTSTP (Ctrl-Z) flips foreground-only mode. The handler runs in
///   signal context, so it is limited to an atomic flip and a raw write of
///   a fixed notice.
///
/// Call once at startup, before the first command is read; failure here
/// leaves the shell unable to honor its signal contract.
pub fn install_shell_dispositions() -> io::Result<()> {
    unsafe { signal::signal(Signal::SIGINT, SigHandler::SigIgn) }?;
    unsafe {
        low_level::register(SIGTSTP, || {
            let notice = toggle_foreground_only();
            let _ = unistd::write(libc::STDOUT_FILENO, notice);
        })
    }?;
    Ok(())
}

/// Flips the mode flag and returns the notice describing the new state.
fn toggle_foreground_only() -> &'static [u8] {
    if FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst) {
        EXIT_NOTICE
    } else {
        ENTER_NOTICE
    }
}

/// Current foreground-only mode. Dispatch reads this once per command;
/// a toggle landing later never reclassifies a command already running.
pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

/// Reconfigures dispositions in a freshly forked child, before exec.
///
/// Every child re-ignores SIGTSTP so mode toggling stays a shell-only
/// affair. Only a foreground child gets default terminate-on-SIGINT back;
/// a background child keeps the inherited ignore, leaving the one
/// foreground child as the sole process Ctrl-C can kill.
pub fn apply_child_dispositions(background: bool) -> io::Result<()> {
    unsafe { signal::signal(Signal::SIGTSTP, SigHandler::SigIgn) }?;
    if !background {
        unsafe { signal::signal(Signal::SIGINT, SigHandler::SigDfl) }?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_round_trips() {
        assert!(!foreground_only());
        assert_eq!(toggle_foreground_only(), ENTER_NOTICE);
        assert!(foreground_only());
        assert_eq!(toggle_foreground_only(), EXIT_NOTICE);
        assert!(!foreground_only());
    }
}
