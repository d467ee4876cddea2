mod commands;
mod terminal;

use commands::{CommandLine, Commands, bruteforce, flood};
use terminal::logging;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    match commands.command {
        Commands::Flood(args) => flood::run(args),
        Commands::Bruteforce(args) => bruteforce::run(args),
    }
}
