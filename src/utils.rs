use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};

/// Route `log` records to stderr; stdout carries only the status line.
pub fn init_logging(debug: bool) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::BrightCyan)
        .error(Color::BrightRed)
        .warn(Color::BrightYellow)
        .debug(Color::BrightWhite);

    fern::Dispatch::new()
        .format(move |out, message, record| match record.level() {
            Level::Debug => out.finish(format_args!(
                "{} [{}]: {}",
                colors.color(Level::Debug).to_string().to_lowercase(),
                record.target(),
                message
            )),
            level => out.finish(format_args!(
                "{}: {}",
                colors.color(level).to_string().to_lowercase(),
                message
            )),
        })
        .level(if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .chain(std::io::stderr())
        .apply()
}

pub fn format_path(p: &std::path::Path) -> String {
    let s = p.to_string_lossy();
    if let Some(b) = directories::BaseDirs::new() {
        let home_s = b.home_dir().to_string_lossy();
        if let Some(rest) = s.strip_prefix(&*home_s) {
            return format!("~{rest}");
        }
    }
    s.into_owned()
}
