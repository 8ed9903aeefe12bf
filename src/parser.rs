use nix::unistd::Pid;

/// A parsed, validated command line.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command and its arguments; the command itself is `argv[0]`.
    pub argv: Vec<String>,
    /// Input redirection target, if any.
    pub infile: Option<String>,
    /// Output redirection target, if any.
    pub outfile: Option<String>,
    /// Whether the command asked to run in the background.
    pub background: bool,
}

impl CommandSpec {
    /// The program to run.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

/// Parses one input line into a `CommandSpec`. This function handles:
///
/// - Blank lines and `#` comments, which run nothing (`Ok(None)`)
/// - Whitespace tokenization (no quoting or escaping)
/// - `$$` expansion to the shell's process id, inside any token
/// - Input ("<") and output (">") redirection targets
/// - Background execution ("&")
///
/// Returns `Ok(Some(command))` for a runnable command, `Ok(None)` for a line
/// with nothing to run, or `Err(String)` on a malformed line.
pub fn parse_command_line(line: &str, shell_pid: Pid) -> Result<Option<CommandSpec>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.contains('\0') {
        return Err("command line contains a NUL byte".into());
    }

    let mut argv = Vec::new();
    let mut infile = None;
    let mut outfile = None;
    let mut background = false;

    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        match token {
            "<" => match tokens.next() {
                Some(file) => infile = Some(expand_pid(file, shell_pid)),
                None => return Err("no input file specified".into()),
            },
            ">" => match tokens.next() {
                Some(file) => outfile = Some(expand_pid(file, shell_pid)),
                None => return Err("no output file specified".into()),
            },
            "&" => background = true,
            _ => argv.push(expand_pid(token, shell_pid)),
        }
    }

    if argv.is_empty() {
        return Err("no command given".into());
    }

    Ok(Some(CommandSpec {
        argv,
        infile,
        outfile,
        background,
    }))
}

/// Replaces every `$$` in the token with the shell's pid, so users can
/// script dynamic filenames like `out$$.txt`.
fn expand_pid(token: &str, shell_pid: Pid) -> String {
    if token.contains("$$") {
        token.replace("$$", &shell_pid.to_string())
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<CommandSpec> {
        parse_command_line(line, Pid::from_raw(777)).unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let cmd = parse("ls -l").unwrap();
        assert_eq!(cmd.argv, vec!["ls", "-l"]);
        assert_eq!(cmd.infile, None);
        assert_eq!(cmd.outfile, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_parse_background() {
        let cmd = parse("sleep 5 &").unwrap();
        assert_eq!(cmd.argv, vec!["sleep", "5"]);
        assert!(cmd.background);
    }

    #[test]
    fn test_parse_redirections() {
        let cmd = parse("wc -l < words.txt > count.txt").unwrap();
        assert_eq!(cmd.argv, vec!["wc", "-l"]);
        assert_eq!(cmd.infile, Some("words.txt".to_string()));
        assert_eq!(cmd.outfile, Some("count.txt".to_string()));
        assert!(!cmd.background);
    }

    #[test]
    fn test_blank_and_comment_lines_run_nothing() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \n"), None);
        assert_eq!(parse("# just a comment"), None);
    }

    #[test]
    fn test_pid_expansion() {
        let cmd = parse("echo hello $$").unwrap();
        assert_eq!(cmd.argv, vec!["echo", "hello", "777"]);

        let cmd = parse("sort < in$$ > log$$.txt").unwrap();
        assert_eq!(cmd.infile, Some("in777".to_string()));
        assert_eq!(cmd.outfile, Some("log777.txt".to_string()));
    }

    #[test]
    fn test_missing_redirection_target() {
        assert!(parse_command_line("cat <", Pid::from_raw(1)).is_err());
        assert!(parse_command_line("cat >", Pid::from_raw(1)).is_err());
    }

    #[test]
    fn test_bare_ampersand_anywhere_marks_background() {
        let cmd = parse("kill & now").unwrap();
        assert_eq!(cmd.argv, vec!["kill", "now"]);
        assert!(cmd.background);
    }

    #[test]
    fn test_redirection_without_command_is_an_error() {
        assert!(parse_command_line("< input.txt", Pid::from_raw(1)).is_err());
    }
}
