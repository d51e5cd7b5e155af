//! The declared specification: options, positional arguments, and the
//! command tree.
//!
//! A [`Command`] owns its subcommands by value, so the tree is acyclic by
//! construction and read-only once built. Invalid declarations (duplicate
//! option aliases, a trailing argument that is not last, duplicate
//! subcommand names) panic in the builder.

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::parser::Context;
use crate::slot::{Slot, ValuePolicy};

/// Argument name marking the final positional slot as variadic.
pub const TRAILING: &str = "*";

/// Handler invoked when an option matches; `None` means the option was
/// given without a value.
pub type OptionCallback<'a> =
    Box<dyn Fn(Option<&'a str>, &Context<'a, '_>) -> Result<(), ParseError<'a>> + 'a>;

/// Handler invoked for each positional token bound to an argument.
pub type ArgumentCallback<'a> =
    Box<dyn Fn(&'a str, &Context<'a, '_>) -> Result<(), ParseError<'a>> + 'a>;

/// The unit of work a fully resolved command executes.
pub type Action<'a> = Box<dyn Fn() -> Result<(), ParseError<'a>> + 'a>;

enum OptHandler<'a> {
    Slot(Slot<'a>),
    Callback(OptionCallback<'a>),
}

/// A named, prefixed flag with zero-or-one bound value.
pub struct Opt<'a> {
    names: Vec<&'a str>,
    description: &'a str,
    policy: ValuePolicy,
    handler: OptHandler<'a>,
}

impl<'a> Opt<'a> {
    /// Declare an option writing through a typed destination.
    ///
    /// Aliases are given without prefix characters (`"v"`, `"verbose"`).
    /// The value policy follows the destination type: a boolean may be
    /// given bare, everything else requires a value.
    pub fn new(names: &[&'a str], description: &'a str, slot: impl Into<Slot<'a>>) -> Self {
        let slot = slot.into();
        Self {
            names: names.to_vec(),
            description,
            policy: slot.policy(),
            handler: OptHandler::Slot(slot),
        }
    }

    /// Declare an option with an explicit value policy and callback.
    pub fn with_callback<F>(
        names: &[&'a str],
        description: &'a str,
        policy: ValuePolicy,
        callback: F,
    ) -> Self
    where
        F: Fn(Option<&'a str>, &Context<'a, '_>) -> Result<(), ParseError<'a>> + 'a,
    {
        Self {
            names: names.to_vec(),
            description,
            policy,
            handler: OptHandler::Callback(Box::new(callback)),
        }
    }

    pub fn names(&self) -> &[&'a str] {
        &self.names
    }

    pub fn description(&self) -> &'a str {
        self.description
    }

    pub fn policy(&self) -> ValuePolicy {
        self.policy
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|alias| *alias == name)
    }

    pub(crate) fn invoke(
        &self,
        value: Option<&'a str>,
        ctx: &Context<'a, '_>,
    ) -> Result<(), ParseError<'a>> {
        match &self.handler {
            OptHandler::Slot(slot) => slot.store(value, ctx),
            OptHandler::Callback(callback) => callback(value, ctx),
        }
    }
}

enum ArgHandler<'a> {
    Slot(Slot<'a>),
    Callback(ArgumentCallback<'a>),
}

/// A mandatory positional value, bound by position rather than name.
///
/// The name [`TRAILING`] (`*`) marks the final argument as variadic: it
/// absorbs every remaining positional token, zero or more, one handler
/// invocation per token.
pub struct Arg<'a> {
    name: &'a str,
    description: &'a str,
    handler: ArgHandler<'a>,
}

impl<'a> Arg<'a> {
    /// Declare an argument writing through a typed destination.
    pub fn new(name: &'a str, description: &'a str, slot: impl Into<Slot<'a>>) -> Self {
        Self {
            name,
            description,
            handler: ArgHandler::Slot(slot.into()),
        }
    }

    /// Declare an argument with a callback.
    pub fn with_callback<F>(name: &'a str, description: &'a str, callback: F) -> Self
    where
        F: Fn(&'a str, &Context<'a, '_>) -> Result<(), ParseError<'a>> + 'a,
    {
        Self {
            name,
            description,
            handler: ArgHandler::Callback(Box::new(callback)),
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn description(&self) -> &'a str {
        self.description
    }

    pub fn is_trailing(&self) -> bool {
        self.name == TRAILING
    }

    pub(crate) fn invoke(
        &self,
        value: &'a str,
        ctx: &Context<'a, '_>,
    ) -> Result<(), ParseError<'a>> {
        match &self.handler {
            ArgHandler::Slot(slot) => slot.store(Some(value), ctx),
            ArgHandler::Callback(callback) => callback(value, ctx),
        }
    }
}

/// A node in the dispatch tree: options, positional arguments or
/// subcommands, and the action to run once the node is resolved.
///
/// Subcommands take precedence over arguments during dispatch when both
/// are declared.
pub struct Command<'a> {
    pub(crate) description: &'a str,
    pub(crate) action: Action<'a>,
    pub(crate) options: Vec<Opt<'a>>,
    pub(crate) subcommands: IndexMap<&'a str, Command<'a>>,
    pub(crate) arguments: Vec<Arg<'a>>,
}

impl<'a> Command<'a> {
    /// A command with the given description and an idle action.
    pub fn new(description: &'a str) -> Self {
        Self {
            description,
            action: Box::new(|| Ok(())),
            options: Vec::new(),
            subcommands: IndexMap::new(),
            arguments: Vec::new(),
        }
    }

    /// Add one option.
    ///
    /// Panics if any alias is already taken by a previously added option.
    pub fn option(mut self, opt: Opt<'a>) -> Self {
        for alias in opt.names() {
            if self.options.iter().any(|o| o.matches(alias)) {
                panic!("duplicate option alias '{alias}'");
            }
        }
        self.options.push(opt);
        self
    }

    /// Add several options.
    pub fn options(self, opts: impl IntoIterator<Item = Opt<'a>>) -> Self {
        opts.into_iter().fold(self, Command::option)
    }

    /// Add one positional argument.
    ///
    /// Panics if a trailing argument has already been declared, since the
    /// trailing slot must be last.
    pub fn argument(mut self, arg: Arg<'a>) -> Self {
        if self.arguments.last().is_some_and(Arg::is_trailing) {
            panic!("trailing argument must be declared last");
        }
        self.arguments.push(arg);
        self
    }

    /// Add several positional arguments.
    pub fn arguments(self, args: impl IntoIterator<Item = Arg<'a>>) -> Self {
        args.into_iter().fold(self, Command::argument)
    }

    /// Add a named subcommand.
    ///
    /// Panics if the name is already taken.
    pub fn subcommand(mut self, name: &'a str, command: Command<'a>) -> Self {
        if self.subcommands.insert(name, command).is_some() {
            panic!("duplicate subcommand '{name}'");
        }
        self
    }

    /// Set the action executed when dispatch resolves to this command.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<(), ParseError<'a>> + 'a,
    {
        self.action = Box::new(action);
        self
    }

    pub fn description(&self) -> &'a str {
        self.description
    }

    pub fn option_list(&self) -> &[Opt<'a>] {
        &self.options
    }

    pub fn argument_list(&self) -> &[Arg<'a>] {
        &self.arguments
    }

    pub fn subcommand_list(&self) -> &IndexMap<&'a str, Command<'a>> {
        &self.subcommands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_is_marked_by_name() {
        let plain = Arg::with_callback("file", "Input file", |_, _| Ok(()));
        let star = Arg::with_callback(TRAILING, "Everything else", |_, _| Ok(()));
        assert!(!plain.is_trailing());
        assert!(star.is_trailing());
    }

    #[test]
    fn alias_matching_covers_all_names() {
        let opt = Opt::with_callback(&["u", "user"], "User name", ValuePolicy::Required, |_, _| {
            Ok(())
        });
        assert!(opt.matches("u"));
        assert!(opt.matches("user"));
        assert!(!opt.matches("used"));
        assert!(!opt.matches(""));
    }

    #[test]
    #[should_panic(expected = "duplicate option alias")]
    fn duplicate_aliases_are_rejected() {
        let _ = Command::new("test")
            .option(Opt::with_callback(
                &["v", "verbose"],
                "Chatty",
                ValuePolicy::NotRequired,
                |_, _| Ok(()),
            ))
            .option(Opt::with_callback(
                &["v", "version"],
                "Version",
                ValuePolicy::NotRequired,
                |_, _| Ok(()),
            ));
    }

    #[test]
    #[should_panic(expected = "trailing argument must be declared last")]
    fn trailing_argument_must_be_last() {
        let _ = Command::new("test")
            .argument(Arg::with_callback(TRAILING, "Tail", |_, _| Ok(())))
            .argument(Arg::with_callback("file", "Input file", |_, _| Ok(())));
    }

    #[test]
    #[should_panic(expected = "duplicate subcommand")]
    fn duplicate_subcommands_are_rejected() {
        let _ = Command::new("test")
            .subcommand("list", Command::new("List things"))
            .subcommand("list", Command::new("List again"));
    }

    #[test]
    fn subcommands_keep_declaration_order() {
        let cmd = Command::new("test")
            .subcommand("zeta", Command::new("Last letter"))
            .subcommand("alpha", Command::new("First letter"));
        let names: Vec<&str> = cmd.subcommand_list().keys().copied().collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
