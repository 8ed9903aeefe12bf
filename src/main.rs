mod builtins;
mod exec;
mod jobs;
mod parser;
mod redirect;
mod shell;
mod signals;
mod utils;

use std::env;

fn main() {
    // Parse command-line arguments.
    let args: Vec<String> = env::args().collect();
    let mut emit_prompt = true;
    let mut verbose = false;
    for arg in &args[1..] {
        match arg.as_str() {
            "-h" => utils::print_usage(),
            "-v" => verbose = true,
            "-p" => emit_prompt = false,
            _ => {}
        }
    }

    // The shell cannot keep its signal contract without these.
    if let Err(e) = signals::install_shell_dispositions() {
        utils::fatal(&format!("installing signal dispositions: {}", e));
    }

    // Run the main shell loop with the options.
    shell::run_shell(emit_prompt, verbose);
}
