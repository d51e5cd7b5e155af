//! Usage and version rendering, and the built-in options that print them.
//!
//! The renderers only consume the command-tree data the dispatch engine
//! already computes. The built-in option factories short-circuit parsing
//! through the stop signal so no action runs after printing.

use semver::Version;

use crate::command::{Command, Opt};
use crate::error::{Code, ParseError};
use crate::parser::Context;
use crate::slot::ValuePolicy;

/// Render the usage text for one command.
///
/// Single-character aliases are shown with one prefix character, longer
/// aliases with two. Option and subcommand rows are aligned to the widest
/// entry; subcommands appear in declaration order.
pub fn render(prefix: char, progname: &str, cmd: &Command<'_>) -> String {
    let mut out = String::new();

    out.push_str("Usage: ");
    out.push_str(progname);
    if !cmd.option_list().is_empty() {
        out.push_str(" [options]");
    }
    for arg in cmd.argument_list() {
        out.push_str(&format!(" [{}]", arg.name()));
    }
    if !cmd.subcommand_list().is_empty() {
        out.push_str(" <command>");
    }
    out.push('\n');
    out.push_str(cmd.description());
    out.push('\n');

    if !cmd.option_list().is_empty() {
        out.push_str("Options:\n");
        let rows: Vec<(String, &str)> = cmd
            .option_list()
            .iter()
            .map(|opt| (format_aliases(prefix, opt.names()), opt.description()))
            .collect();
        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        for (left, description) in rows {
            out.push_str(&format!("  {left:width$}  {description}\n"));
        }
    }

    if !cmd.subcommand_list().is_empty() {
        out.push_str("Commands:\n");
        let width = cmd
            .subcommand_list()
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0);
        for (name, sub) in cmd.subcommand_list() {
            out.push_str(&format!("  {name:width$}  {}\n", sub.description()));
        }
    }

    out
}

/// Render the one-line version text: `name major.minor.patch[-prerelease]`.
pub fn render_version(name: &str, version: &Version) -> String {
    format!("{name} {version}")
}

fn format_aliases(prefix: char, names: &[&str]) -> String {
    let mut out = String::new();
    for (index, name) in names.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push(prefix);
        if name.chars().count() > 1 {
            out.push(prefix);
        }
        out.push_str(name);
    }
    out
}

fn print_help<'a>(value: Option<&'a str>, ctx: &Context<'a, '_>) -> Result<(), ParseError<'a>> {
    let parser = ctx.parser;
    match value {
        Some(target) => {
            let cmd = parser
                .root()
                .subcommand_list()
                .get(target)
                .ok_or_else(|| ParseError::new(Code::InvalidInput, target))?;
            print!("{}", render(parser.prefix(), target, cmd));
        }
        None => {
            let progname = ctx.args.first().copied().unwrap_or_default();
            print!("{}", render(parser.prefix(), progname, parser.root()));
        }
    }

    Err(ParseError::stop("help"))
}

/// The built-in `-h`/`--help` option.
///
/// An optional value names a root-level subcommand to describe; without
/// one the root command's usage is printed with the program-name token as
/// heading. Always short-circuits with the stop signal.
pub fn help_option<'a>() -> Opt<'a> {
    Opt::with_callback(
        &["h", "help"],
        "Print help",
        ValuePolicy::Optional,
        print_help,
    )
}

/// The built-in `-v`/`--version` option. Prints the application name and
/// semantic version, then short-circuits with the stop signal.
pub fn version_option<'a>(name: &'a str, version: Version) -> Opt<'a> {
    let line = render_version(name, &version);
    Opt::with_callback(
        &["v", "version"],
        "Print version",
        ValuePolicy::NotRequired,
        move |_, _| {
            println!("{line}");
            Err(ParseError::stop("version"))
        },
    )
}
