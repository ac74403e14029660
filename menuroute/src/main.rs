use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use menuroute::handlers::{
    handle_build, handle_check, handle_iframes_clear, handle_iframes_find, handle_iframes_list,
    handle_init, handle_lint,
};
use tracing::Level;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    init_logging(&chosen_command);

    let result = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("build", primary_command)) => handle_build(primary_command).await,
        Some(("lint", primary_command)) => handle_lint(primary_command),
        Some(("check", primary_command)) => handle_check(primary_command).await,
        Some(("iframes", primary_command)) => match primary_command.subcommand() {
            Some(("list", secondary_command)) => handle_iframes_list(secondary_command),
            Some(("find", secondary_command)) => handle_iframes_find(secondary_command),
            Some(("clear", secondary_command)) => handle_iframes_clear(secondary_command),
            _ => unreachable!("clap should ensure we don't get here"),
        },
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else if matches.get_flag("quiet") {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
