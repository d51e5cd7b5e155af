//! A tiny multi-command calculator exercising the cmdtree library:
//! root-level typed options, nested subcommands with typed positional
//! arguments, and the built-in help/version surfaces.

use std::cell::Cell;
use std::env;
use std::process::ExitCode;

use cmdtree::{help_option, version_option, Arg, Command, Opt, Parser};
use semver::Version;
use tracing_subscriber::{fmt, EnvFilter};

const APP_NAME: &str = "cmdtree-demo";

fn app_version() -> Version {
    Version::new(0, 1, 0)
}

fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<String> = env::args().collect();
    let args: Vec<&str> = argv.iter().map(String::as_str).collect();
    tracing::debug!("parsing {} argv tokens", args.len());

    let count = Cell::new(3u32);
    let user = Cell::new("world");
    let left = Cell::new(0i64);
    let right = Cell::new(0i64);

    let parser = Parser::new("A tiny multi-command calculator")
        .identity(APP_NAME, app_version())
        .option(help_option())
        .option(version_option(APP_NAME, app_version()))
        .option(Opt::new(&["n", "count"], "How many lines to print", &count))
        .option(Opt::new(&["u", "user"], "Name to greet", &user))
        .subcommand(
            "greet",
            Command::new("Say hello").action(|| {
                println!("Hello '{}'", user.get());
                Ok(())
            }),
        )
        .subcommand(
            "count",
            Command::new("Print a numbered list").action(|| {
                for line in 0..count.get() {
                    println!(" - {line}");
                }
                Ok(())
            }),
        )
        .subcommand(
            "add",
            Command::new("Add two integers")
                .argument(Arg::new("left", "First operand", &left))
                .argument(Arg::new("right", "Second operand", &right))
                .action(|| {
                    println!(
                        "{} + {} = {}",
                        left.get(),
                        right.get(),
                        left.get() + right.get()
                    );
                    Ok(())
                }),
        );

    parser.run(&args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
