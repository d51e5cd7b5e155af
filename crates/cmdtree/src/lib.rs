//! Declarative command-line parsing with typed bindings and nested
//! subcommands.
//!
//! Applications declare a tree of options, positional arguments, and
//! subcommands, each bound to a typed destination ([`Slot`]) or a
//! callback; [`Parser::parse`] then resolves a raw token array to exactly
//! one executable [`Action`], or a structured [`ParseError`]. Destinations
//! are caller-owned [`Cell`](std::cell::Cell)s written through during the
//! single parse call; tokens and names cross the boundary as borrowed
//! views, so matching itself does not allocate.
//!
//! ```
//! use std::cell::Cell;
//! use cmdtree::{Arg, Command, Opt, Parser};
//!
//! let verbose = Cell::new(false);
//! let left = Cell::new(0i32);
//! let right = Cell::new(0i32);
//!
//! let parser = Parser::new("Add two numbers")
//!     .option(Opt::new(&["V", "verbose"], "Chatty output", &verbose))
//!     .subcommand(
//!         "add",
//!         Command::new("Add the operands")
//!             .argument(Arg::new("left", "First operand", &left))
//!             .argument(Arg::new("right", "Second operand", &right)),
//!     );
//!
//! let action = parser.parse(&["prog", "add", "2", "40"]).unwrap();
//! action().unwrap();
//! assert_eq!(left.get() + right.get(), 42);
//! ```
//!
//! For a hosting CLI, [`Parser::run`] realizes the whole process-exit
//! contract: it parses, invokes the resolved action, prints any real
//! error to stderr, and maps the built-in help/version stop signal to a
//! successful exit.

pub mod command;
pub mod convert;
pub mod error;
pub mod help;
pub mod multi;
pub mod parser;
pub mod slot;

/// Re-exported so callers can name the [`semver::Version`] type the
/// version built-ins take without adding their own dependency.
pub use semver;

pub use command::{Action, Arg, ArgumentCallback, Command, Opt, OptionCallback, TRAILING};
pub use error::{Code, ParseError, ParseResult};
pub use help::{help_option, version_option};
pub use multi::MultiValue;
pub use parser::{Context, Parser, DEFAULT_PREFIX, DEFAULT_VALUE_SEPARATOR};
pub use slot::{Slot, ValuePolicy};
