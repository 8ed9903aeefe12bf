/*
 * sigself.rs - Sends a chosen signal to itself after a delay
 *
 * usage: sigself <secs> <signo>
 * Sleeps for <secs> seconds and then delivers signal <signo> to itself.
 * Useful for watching how the shell reports signal-terminated foreground
 * and background commands.
 */

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::env;
use std::process;
use std::thread;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <secs> <signo>", args[0]);
        process::exit(1);
    }

    let secs = args[1].parse::<u64>().unwrap_or_else(|_| {
        eprintln!("Error: <secs> must be a non-negative integer");
        process::exit(1);
    });

    let signo = args[2]
        .parse::<i32>()
        .ok()
        .and_then(|n| Signal::try_from(n).ok())
        .unwrap_or_else(|| {
            eprintln!("Error: <signo> must be a valid signal number");
            process::exit(1);
        });

    for _ in 0..secs {
        thread::sleep(Duration::from_secs(1));
    }

    let pid = Pid::from_raw(process::id() as i32);
    if let Err(err) = signal::kill(pid, signo) {
        eprintln!("kill error: {}", err);
        process::exit(1);
    }

    process::exit(0);
}
