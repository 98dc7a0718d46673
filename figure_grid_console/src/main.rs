#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod network;
mod tui;

use std::io;

use clap::{Command, arg};

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("FigureGrid")
        .version(clap::crate_version!())
        .about("Console client for the figure-guessing grid game")
        .arg(arg!([server_address] "Server address").default_value("127.0.0.1:8080"))
        .get_matches();

    client_main::run(client_main::ClientConfig {
        server_address: matches.get_one::<String>("server_address").unwrap().clone(),
    })
}
