use colored::Colorize;

pub fn print_banner_with_version() {
    println!(
        "{} {}",
        "scrolldeck".bold().cyan(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}
