use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("menuroute")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("menuroute")
        .about("Turn role-filtered menu trees into dynamic route tables")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Only print results; suppress headers and progress")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Show debug logging from the routing pipeline")
                .required(false)
                .global(true)
                .conflicts_with("quiet"),
        )
        .arg(
            arg!(-c --"config" <PATH>)
                .required(false)
                .global(true)
                .help("Path to the menuroute config file")
                .default_value("~/.config/menuroute/config.json"),
        )
        .subcommand_required(true)
        .subcommand(
            command!("init")
                .about("Writes a default config and a sample menu file")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Directory to store menuroute state in")
                        .default_value("~/.config/menuroute/"),
                )
                .arg(
                    arg!(-f --"force")
                        .help("Overwrite an existing config and menu file without asking")
                        .required(false),
                ),
        )
        .subcommand(
            command!("build")
                .about(
                    "Runs the menu pipeline, registers the resulting routes and prints the \
                route table",
                )
                .arg(
                    arg!(-m --"menu" <FILE>)
                        .required(false)
                        .help("Menu file: a JSON array of menu nodes or a {code, msg, data} response")
                        .value_parser(clap::value_parser!(PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Backend base URL to fetch menus from (implies backend mode)")
                        .value_parser(clap::value_parser!(Url))
                        .conflicts_with("menu"),
                )
                .arg(
                    arg!(-r --"roles" <ROLES>)
                        .required(false)
                        .help("Comma-separated role codes of the current user, e.g. R_SUPER,R_ADMIN"),
                )
                .arg(
                    arg!(--"mode" <MODE>)
                        .required(false)
                        .help("Where menus come from (default: config value)")
                        .value_parser(["frontend", "backend"]),
                )
                .arg(
                    arg!(-t --"token" <TOKEN>)
                        .required(false)
                        .help("Access token sent as the Authorization header in backend mode"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save the route table to a file (default: display to screen)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            command!("lint")
                .about("Reports child menu paths that are absolute and other structural problems")
                .arg(
                    arg!(-m --"menu" <FILE>)
                        .required(true)
                        .help("Menu file to check")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            command!("check")
                .about("Answers whether a path is reachable for a set of roles")
                .arg(
                    arg!(-m --"menu" <FILE>)
                        .required(true)
                        .help("Menu file to check against")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-p --"path" <PATH>)
                        .required(true)
                        .help("Navigation target, e.g. /system/user"),
                )
                .arg(
                    arg!(-r --"roles" <ROLES>)
                        .required(false)
                        .help("Comma-separated role codes of the current user"),
                ),
        )
        .subcommand(
            command!("iframes")
                .about("Inspect the saved iframe route registry")
                .subcommand_required(true)
                .subcommand(command!("list").about("List every saved iframe route"))
                .subcommand(
                    command!("find").about("Look up an iframe route by path").arg(
                        arg!(-p --"path" <PATH>)
                            .required(true)
                            .help("Full path of the iframe route"),
                    ),
                )
                .subcommand(command!("clear").about("Forget every saved iframe route")),
        )
}
