//! Comma-separated multi-value collection.
//!
//! A [`MultiValue`] turns one option occurrence like `--dep=a,b,c` into
//! one parsed element per item, collected across repeated occurrences.
//! The whole occurrence is rejected if any element fails to parse, and
//! nothing from it is kept.

use std::cell::{Ref, RefCell};

use crate::error::{Code, ParseError};
use crate::parser::Context;

/// A growable set of values fed by an option handler.
///
/// The element parser returns `None` for a malformed element, which
/// aborts the occurrence with [`Code::OptionParsing`] tagged with that
/// element.
pub struct MultiValue<T, F>
where
    F: Fn(&str) -> Option<T>,
{
    values: RefCell<Vec<T>>,
    parse: F,
}

impl<T, F> MultiValue<T, F>
where
    F: Fn(&str) -> Option<T>,
{
    pub fn new(parse: F) -> Self {
        Self {
            values: RefCell::new(Vec::new()),
            parse,
        }
    }

    /// An option handler splitting the value on `,` and collecting each
    /// parsed element. Pass to
    /// [`Opt::with_callback`](crate::Opt::with_callback) with
    /// [`ValuePolicy::Required`](crate::ValuePolicy::Required).
    pub fn handler<'a>(
        &'a self,
    ) -> impl Fn(Option<&'a str>, &Context<'a, '_>) -> Result<(), ParseError<'a>> + 'a {
        move |value, ctx| {
            let Some(text) = value else {
                return Err(ParseError::new(Code::ValueExpected, ctx.name));
            };

            let mut parsed = Vec::new();
            for element in text.split(',') {
                match (self.parse)(element) {
                    Some(item) => parsed.push(item),
                    None => return Err(ParseError::new(Code::OptionParsing, element)),
                }
            }

            self.values.borrow_mut().extend(parsed);
            Ok(())
        }
    }

    pub fn has_values(&self) -> bool {
        !self.values.borrow().is_empty()
    }

    pub fn values(&self) -> Ref<'_, Vec<T>> {
        self.values.borrow()
    }

    pub fn into_values(self) -> Vec<T> {
        self.values.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Opt;
    use crate::convert;
    use crate::parser::Parser;
    use crate::slot::ValuePolicy;

    #[test]
    fn splits_and_parses_every_element() {
        let deps = MultiValue::new(convert::parse_u64);
        let parser = Parser::new("test").option(Opt::with_callback(
            &["d", "dep"],
            "Dependency ids",
            ValuePolicy::Required,
            deps.handler(),
        ));

        parser.parse(&["prog", "--dep=3,5,8"]).unwrap();
        assert!(deps.has_values());
        assert_eq!(*deps.values(), vec![3, 5, 8]);
    }

    #[test]
    fn repeated_occurrences_append() {
        let deps = MultiValue::new(convert::parse_u64);
        let parser = Parser::new("test").option(Opt::with_callback(
            &["dep"],
            "Dependency ids",
            ValuePolicy::Required,
            deps.handler(),
        ));

        parser.parse(&["prog", "--dep=1", "--dep=2,3"]).unwrap();
        drop(parser);
        assert_eq!(deps.into_values(), vec![1, 2, 3]);
    }

    #[test]
    fn bad_element_rejects_the_whole_occurrence() {
        let deps = MultiValue::new(convert::parse_u64);
        let parser = Parser::new("test").option(Opt::with_callback(
            &["dep"],
            "Dependency ids",
            ValuePolicy::Required,
            deps.handler(),
        ));

        let err = parser.parse(&["prog", "--dep=1,x,3"]).err().unwrap();
        assert_eq!(err.code(), Code::OptionParsing);
        assert_eq!(err.tag(), "x");
        assert!(!deps.has_values());
    }
}
