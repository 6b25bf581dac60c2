use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Map the global `-q` / `-v` flags to a log level.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the terminal logger on stderr. Only records from this crate
/// are shown; winit and wgpu chatter is filtered out.
pub fn init(verbose: u8, quiet: bool, no_color: bool) {
    let level = level_for(verbose, quiet);
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .add_filter_allow_str("scrolldeck")
        .build();
    let color = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    if let Err(e) = TermLogger::init(level, config, TerminalMode::Stderr, color) {
        eprintln!("logger already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(5, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }
}
