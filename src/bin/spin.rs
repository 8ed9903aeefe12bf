/*
 * spin.rs - A handy program for exercising the shell by hand
 *
 * usage: spin <secs> [code]
 * Sleeps for <secs> seconds in 1-second chunks, then exits with <code>
 * (default 0). Run it with & to watch background completion reporting,
 * or with a non-zero code to watch the status built-in.
 */

use std::env;
use std::process;
use std::thread;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <secs> [code]", args[0]);
        process::exit(1);
    }

    let secs = args[1].parse::<u64>().unwrap_or_else(|_| {
        eprintln!("Error: <secs> must be a non-negative integer");
        process::exit(1);
    });

    let code = match args.get(2) {
        Some(raw) => raw.parse::<i32>().unwrap_or_else(|_| {
            eprintln!("Error: <code> must be an integer");
            process::exit(1);
        }),
        None => 0,
    };

    for _ in 0..secs {
        thread::sleep(Duration::from_secs(1));
    }

    process::exit(code);
}
