//! The matching and dispatch engine.
//!
//! Parsing is one synchronous recursive-descent pass over the token
//! array: at each command node the option matcher consumes the run of
//! option-looking tokens, then dispatch either descends into a subcommand
//! or binds the remaining tokens to positional arguments. The first
//! failure anywhere aborts the whole parse; there is no backtracking.

use std::process::ExitCode;

use semver::Version;

use crate::command::{Action, Arg, Command, Opt};
use crate::error::{Code, ParseError, ParseResult};
use crate::help;
use crate::slot::ValuePolicy;

/// Default prefix for flags and options.
pub const DEFAULT_PREFIX: char = '-';

/// Default separator between an option name and its inline value.
pub const DEFAULT_VALUE_SEPARATOR: char = '=';

/// Per-invocation state threaded through every handler.
///
/// Handlers get a non-owning view of the token array, the offset of the
/// token being considered, the name under consideration, and the parser
/// itself so built-ins can introspect sibling structure.
#[derive(Clone, Copy)]
pub struct Context<'a, 'p> {
    pub args: &'a [&'a str],
    pub offset: usize,
    pub name: &'a str,
    pub parser: &'p Parser<'a>,
}

impl<'a, 'p> Context<'a, 'p> {
    pub fn new(args: &'a [&'a str], offset: usize, name: &'a str, parser: &'p Parser<'a>) -> Self {
        Self {
            args,
            offset,
            name,
            parser,
        }
    }
}

pub(crate) struct AppIdentity<'a> {
    pub(crate) name: &'a str,
    pub(crate) version: Version,
}

/// The root of a declared command-line specification.
///
/// Built once at startup, consumed by exactly one [`parse`](Parser::parse)
/// call. The tree itself is never mutated by parsing; the only writes go
/// through the caller-owned destinations bound to options and arguments.
pub struct Parser<'a> {
    prefix: char,
    separator: char,
    pub(crate) root: Command<'a>,
    pub(crate) app: Option<AppIdentity<'a>>,
}

impl<'a> Parser<'a> {
    /// A parser with the default `-` prefix and `=` value separator.
    pub fn new(description: &'a str) -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
            separator: DEFAULT_VALUE_SEPARATOR,
            root: Command::new(description),
            app: None,
        }
    }

    /// Change the option prefix character.
    pub fn option_prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    /// Change the inline value separator character.
    pub fn value_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Declare the application identity, enabling the built-in `help` and
    /// `version` subcommands on subcommand-style trees. User-declared
    /// subcommands with the same names win over the built-ins.
    pub fn identity(mut self, name: &'a str, version: Version) -> Self {
        self.app = Some(AppIdentity { name, version });
        self
    }

    /// Add one option to the root command.
    pub fn option(mut self, opt: Opt<'a>) -> Self {
        self.root = self.root.option(opt);
        self
    }

    /// Add several options to the root command.
    pub fn options(mut self, opts: impl IntoIterator<Item = Opt<'a>>) -> Self {
        self.root = self.root.options(opts);
        self
    }

    /// Add one positional argument to the root command.
    pub fn argument(mut self, arg: Arg<'a>) -> Self {
        self.root = self.root.argument(arg);
        self
    }

    /// Add several positional arguments to the root command.
    pub fn arguments(mut self, args: impl IntoIterator<Item = Arg<'a>>) -> Self {
        self.root = self.root.arguments(args);
        self
    }

    /// Add a named subcommand to the root command.
    pub fn subcommand(mut self, name: &'a str, command: Command<'a>) -> Self {
        self.root = self.root.subcommand(name, command);
        self
    }

    /// Set the action executed when the bare root resolves.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<(), ParseError<'a>> + 'a,
    {
        self.root = self.root.action(action);
        self
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn description(&self) -> &'a str {
        self.root.description()
    }

    pub fn root(&self) -> &Command<'a> {
        &self.root
    }

    /// Resolve `args` to exactly one action, or a structured error.
    ///
    /// `args[0]` is the program name and is never matched against the
    /// specification; scanning begins at offset 1. The returned action is
    /// not invoked; the caller decides when to run it.
    pub fn parse<'s>(&'s self, args: &'a [&'a str]) -> ParseResult<'a, &'s Action<'a>> {
        if args.is_empty() {
            if self.root.arguments.is_empty() && self.root.subcommands.is_empty() {
                return Ok(&self.root.action);
            }
            return Err(ParseError::new(
                Code::InvalidNumberOfArgs,
                "not enough arguments",
            ));
        }

        self.dispatch(&self.root, args, 1, true)
    }

    /// Parse, invoke the resolved action, and map the outcome to the
    /// process-exit contract: the stop signal and a successful action are
    /// success, everything else prints to stderr and is failure.
    pub fn run(&self, args: &'a [&'a str]) -> ExitCode {
        match self.parse(args) {
            Ok(action) => match action() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{err}");
                    ExitCode::FAILURE
                }
            },
            Err(err) if err.is_stop() => {
                tracing::debug!("parse stopped early: {}", err.tag());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        }
    }

    fn dispatch<'s>(
        &'s self,
        cmd: &'s Command<'a>,
        args: &'a [&'a str],
        start: usize,
        at_root: bool,
    ) -> ParseResult<'a, &'s Action<'a>> {
        let next = self.scan_options(&cmd.options, args, start)?;

        if next < args.len() {
            if !cmd.subcommands.is_empty() {
                let name = args[next];
                if let Some(child) = cmd.subcommands.get(name) {
                    tracing::debug!("dispatching subcommand: {name}");
                    return self.dispatch(child, args, next + 1, false);
                }
                if at_root {
                    if let Some(err) = self.builtin_command(name, args, next) {
                        return Err(err);
                    }
                }
                return Err(ParseError::new(Code::UnexpectedValue, name));
            }

            if !cmd.arguments.is_empty() {
                self.bind_arguments(&cmd.arguments, args, next)?;
                return Ok(&cmd.action);
            }

            return Err(ParseError::new(Code::UnexpectedValue, args[next]));
        }

        if (cmd.arguments.is_empty() && cmd.subcommands.is_empty())
            || cmd.arguments.last().is_some_and(Arg::is_trailing)
        {
            return Ok(&cmd.action);
        }

        Err(ParseError::new(
            Code::InvalidNumberOfArgs,
            "not enough arguments",
        ))
    }

    /// Consume consecutive option-looking tokens against `options`,
    /// returning the offset of the first positional token.
    ///
    /// Every declared option whose alias set contains the parsed name is
    /// invoked. A one-token lookahead supplies the value when none is
    /// inline; the lookahead is consumed at most once per token, and only
    /// by options that accept a value.
    fn scan_options(
        &self,
        options: &[Opt<'a>],
        args: &'a [&'a str],
        start: usize,
    ) -> ParseResult<'a, usize> {
        let mut i = start;
        while i < args.len() {
            let token = args[i];
            if !token.starts_with(self.prefix) {
                break;
            }

            let (name, inline) = split_token(token, self.prefix, self.separator);
            let mut value = inline;
            let mut lookahead = false;
            if value.is_none() {
                if let Some(&following) = args.get(i + 1) {
                    if !following.starts_with(self.prefix) {
                        value = Some(following);
                        lookahead = true;
                    }
                }
            }

            let ctx = Context::new(args, i, name, self);
            let mut matched = 0u32;
            for opt in options {
                if !opt.matches(name) {
                    continue;
                }

                if value.is_none() && opt.policy() == ValuePolicy::Required {
                    return Err(ParseError::new(Code::ValueExpected, name));
                }

                if lookahead && opt.policy() != ValuePolicy::NotRequired {
                    lookahead = false;
                    i += 1;
                }

                matched += 1;
                let passed = match opt.policy() {
                    ValuePolicy::NotRequired => None,
                    _ => value,
                };
                opt.invoke(passed, &ctx)?;
            }

            if matched == 0 {
                let tag = if name.is_empty() { token } else { name };
                return Err(ParseError::new(Code::UnexpectedValue, tag));
            }

            i += 1;
        }

        Ok(i)
    }

    /// Bind the remaining positional tokens to the declared arguments.
    ///
    /// A trailing last argument absorbs everything past the fixed slots,
    /// zero or more tokens, one invocation per token in original order.
    fn bind_arguments(
        &self,
        arguments: &[Arg<'a>],
        args: &'a [&'a str],
        start: usize,
    ) -> ParseResult<'a, usize> {
        let trailing = arguments.last().is_some_and(Arg::is_trailing);
        let available = args.len() - start;

        let minimum = if trailing {
            arguments.len() - 1
        } else {
            arguments.len()
        };
        if available < minimum {
            return Err(ParseError::new(
                Code::InvalidNumberOfArgs,
                "not enough arguments",
            ));
        }
        if !trailing && available > arguments.len() {
            return Err(ParseError::new(
                Code::InvalidNumberOfArgs,
                "too many arguments",
            ));
        }

        let mut pos = start;
        let mut index = 0;
        while index < arguments.len() && pos < args.len() {
            let decl = &arguments[index];
            let ctx = Context::new(args, pos, decl.name(), self);
            decl.invoke(args[pos], &ctx)?;

            if index + 1 < arguments.len() || !trailing {
                index += 1;
            }
            pos += 1;
        }

        Ok(pos)
    }

    /// Root-level `help`/`version` built-in subcommands, consulted only
    /// after user-declared subcommands failed to match.
    fn builtin_command(
        &self,
        name: &'a str,
        args: &'a [&'a str],
        offset: usize,
    ) -> Option<ParseError<'a>> {
        let app = self.app.as_ref()?;

        match name {
            "help" => Some(match args.get(offset + 1) {
                Some(&target) => match self.root.subcommands.get(target) {
                    Some(cmd) => {
                        print!("{}", help::render(self.prefix, target, cmd));
                        ParseError::stop("help")
                    }
                    None => ParseError::new(Code::InvalidInput, target),
                },
                None => {
                    let progname = args.first().copied().unwrap_or(app.name);
                    print!("{}", help::render(self.prefix, progname, &self.root));
                    ParseError::stop("help")
                }
            }),
            "version" => {
                println!("{}", help::render_version(app.name, &app.version));
                Some(ParseError::stop("version"))
            }
            _ => None,
        }
    }
}

/// Split one option-looking token into its name and optional inline
/// value.
///
/// One prefix character is stripped, or two if doubled; the remainder up
/// to the separator is the name. A token made solely of prefix characters
/// yields an empty name.
fn split_token(token: &str, prefix: char, separator: char) -> (&str, Option<&str>) {
    let stripped = match token.strip_prefix(prefix) {
        Some(rest) => rest.strip_prefix(prefix).unwrap_or(rest),
        None => token,
    };

    match stripped.split_once(separator) {
        Some((name, value)) => (name, Some(value)),
        None => (stripped, None),
    }
}
