mod commands;
mod terminal;

use commands::{CommandLine, sweep};
use invsweep_common::config::Config;
use terminal::{input, logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg: Config = commands.to_config();
    cfg.validate()?;

    print::banner(cfg.quiet);

    let range_text: String = match commands.range {
        Some(range) => range,
        None => input::prompt_range()?,
    };

    sweep::sweep(&range_text, &cfg).await
}
