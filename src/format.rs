use std::{env, error::Error as StdError, sync::OnceLock};

use crate::error::Error;
use crate::formatted::{Diagnostic, FormattedError};
use crate::options::{CapturePolicy, Options};
use crate::stack::{self, LineFilter};

/// Shape of an incoming error, as far as formatting is concerned.
#[derive(Debug, Clone, Copy)]
pub enum Classified<'a> {
    /// Already formatted, passes through untouched.
    Formatted(&'a FormattedError),
    /// Carries its own message and locations.
    Located(&'a Error),
    /// Anything else.
    Generic(&'a (dyn StdError + 'static)),
}

/// Classifies an error. Checks run in a fixed order: formatted error, then
/// located error (by value, then boxed), then everything else.
///
/// ```rust
/// use gqlerrors::{classify, Classified, Error};
///
/// let err = Error::new("field X not found").at(2, 5);
/// assert!(matches!(classify(&err), Classified::Located(_)));
///
/// let err = std::fmt::Error;
/// assert!(matches!(classify(&err), Classified::Generic(_)));
/// ```
pub fn classify<'a>(err: &'a (dyn StdError + 'static)) -> Classified<'a> {
    if let Some(formatted) = err.downcast_ref::<FormattedError>() {
        return Classified::Formatted(formatted);
    }
    if let Some(located) = err.downcast_ref::<Error>() {
        return Classified::Located(located);
    }
    if let Some(located) = err.downcast_ref::<Box<Error>>() {
        return Classified::Located(located);
    }
    Classified::Generic(err)
}

#[derive(thiserror::Error, Debug)]
#[error("{0}")]
struct Message(String);

/// Turns arbitrary errors into [`FormattedError`] records.
///
/// The base path used to shorten rendered stack lines is fixed at
/// construction, either from [`Options::base_path`] or from the process
/// working directory.
#[derive(Debug, Clone)]
pub struct Formatter {
    options: Options,
    filter: LineFilter,
}

impl Formatter {
    pub fn new(options: Options) -> Self {
        let base_path = match &options.base_path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => match env::current_dir() {
                Ok(dir) => dir.to_string_lossy().into_owned(),
                Err(e) => {
                    log::debug!("working directory unavailable, stack paths kept as is: {}", e);
                    String::new()
                }
            },
        };
        let filter = LineFilter::from_options(&options, base_path);
        Self { options, filter }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Base path stripped from rendered stack lines.
    pub fn base_path(&self) -> &str {
        &self.filter.base_path
    }

    /// Formats a single error. `field_names` only annotates rendered
    /// diagnostics.
    pub fn format(&self, err: &(dyn StdError + 'static), field_names: &[&str]) -> FormattedError {
        match classify(err) {
            Classified::Formatted(formatted) => {
                log::debug!("error already formatted: {}", formatted.message);
                formatted.clone()
            }
            Classified::Located(located) => {
                log::debug!(
                    "formatting located error with {} location(s): {}",
                    located.locations.len(),
                    located.message
                );
                FormattedError::new(located.message.clone(), located.locations.clone())
                    .with_diagnostic(self.diagnostic(&located.message, field_names))
            }
            Classified::Generic(generic) => {
                let message = generic.to_string();
                log::debug!("formatting generic error: {}", message);
                let diagnostic = self.diagnostic(&message, field_names);
                FormattedError::new(message, Vec::new()).with_diagnostic(diagnostic)
            }
        }
    }

    /// Formats every error on its own, keeping input order.
    pub fn format_all<'e, I>(&self, errs: I) -> Vec<FormattedError>
    where
        I: IntoIterator<Item = &'e (dyn StdError + 'static)>,
    {
        errs.into_iter().map(|err| self.format(err, &[])).collect()
    }

    /// Formats a plain error built from `message`.
    pub fn new_formatted_error<M: Into<String>>(&self, message: M) -> FormattedError {
        self.format(&Message(message.into()), &[])
    }

    fn diagnostic(&self, message: &str, field_names: &[&str]) -> Option<Diagnostic> {
        match self.options.capture {
            CapturePolicy::Disabled => None,
            CapturePolicy::Raw => Some(Diagnostic::Raw(stack::capture())),
            CapturePolicy::Rendered => {
                let snapshot = stack::capture();
                Some(Diagnostic::Rendered(stack::render(
                    message,
                    &snapshot,
                    field_names,
                    &self.filter,
                )))
            }
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

fn default_formatter() -> &'static Formatter {
    static DEFAULT: OnceLock<Formatter> = OnceLock::new();
    DEFAULT.get_or_init(Formatter::default)
}

/// Formats an error with default options.
///
/// ```rust
/// use gqlerrors::{format_error, Error, SourceLocation};
///
/// let err = Error::new("field X not found").at(2, 5);
/// let formatted = format_error(&err, &[]);
///
/// assert_eq!(formatted.message, "field X not found");
/// assert_eq!(formatted.locations, vec![SourceLocation::new(2, 5)]);
/// assert_eq!(format_error(&formatted, &[]), formatted);
/// ```
pub fn format_error(err: &(dyn StdError + 'static), field_names: &[&str]) -> FormattedError {
    default_formatter().format(err, field_names)
}

/// Formats a batch of errors with default options.
pub fn format_errors<'e, I>(errs: I) -> Vec<FormattedError>
where
    I: IntoIterator<Item = &'e (dyn StdError + 'static)>,
{
    default_formatter().format_all(errs)
}

/// Formats a plain error built from `message` with default options.
pub fn new_formatted_error<M: Into<String>>(message: M) -> FormattedError {
    default_formatter().new_formatted_error(message)
}
