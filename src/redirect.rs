use nix::fcntl::{open, OFlag};
use nix::libc;
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2};

/// Null device used for any stream of a background command the user did
/// not redirect explicitly.
pub const DEV_NULL: &str = "/dev/null";

/// Opens `path` read-only and rebinds standard input to it.
///
/// Runs only inside a not-yet-exec'd child; the caller turns a failure
/// into an immediate exit of that child.
pub fn redirect_stdin(path: &str) -> nix::Result<()> {
    let fd = open(path, OFlag::O_RDONLY, Mode::empty())?;
    dup2(fd, libc::STDIN_FILENO)?;
    close(fd)
}

/// Opens `path` for writing, creating it if absent and truncating it if
/// present, and rebinds standard output to it.
pub fn redirect_stdout(path: &str) -> nix::Result<()> {
    let fd = open(
        path,
        OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        Mode::from_bits_truncate(0o777),
    )?;
    dup2(fd, libc::STDOUT_FILENO)?;
    close(fd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd;
    use std::fs;

    #[test]
    fn missing_input_file_is_an_error() {
        assert!(redirect_stdin("/no/such/file/anywhere").is_err());
    }

    #[test]
    fn stdout_redirection_truncates_and_writes() {
        let path = std::env::temp_dir().join(format!("smsh-redirect-{}.txt", std::process::id()));
        let path_str = path.to_str().unwrap();
        fs::write(&path, "stale contents").unwrap();

        // Park the real stdout on a spare descriptor while fd 1 points at
        // the file, then put it back.
        let saved = unistd::dup(libc::STDOUT_FILENO).unwrap();
        redirect_stdout(path_str).unwrap();
        let wrote = unistd::write(libc::STDOUT_FILENO, b"fresh");
        unistd::dup2(saved, libc::STDOUT_FILENO).unwrap();
        unistd::close(saved).unwrap();

        assert_eq!(wrote.unwrap(), 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
        fs::remove_file(&path).unwrap();
    }
}
