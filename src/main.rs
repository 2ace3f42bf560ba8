use anyhow::Result;
use std::io;
use std::process::ExitCode;

use we_statusline::app::run;
use we_statusline::cli::Args;
use we_statusline::notify::NotifySend;
use we_statusline::utils::init_logging;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let mut stdout = io::stdout().lock();
    let code = run(&args, &mut stdout, &NotifySend)?;
    Ok(ExitCode::from(code))
}
