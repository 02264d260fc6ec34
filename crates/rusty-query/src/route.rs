// File: src/route.rs
// Purpose: Route placeholder tokens and pattern joining

use crate::error::ParseError;
use crate::kind::Kind;
use crate::store::QueryLookup;
use std::borrow::Cow;
use std::fmt;

/// A named route segment such as `user_id` or `user_id:[0-9]+`.
///
/// The part before the first `:` is the parameter name; anything after it is
/// a matching pattern handed to the router untouched.
///
/// ```
/// use rusty_query::route::{pattern, Token};
///
/// const USER_ID: Token = Token::new("user_id:[0-9]+");
///
/// assert_eq!(USER_ID.name(), "user_id");
/// assert_eq!(USER_ID.placeholder(), "{user_id:[0-9]+}");
/// assert_eq!(pattern(&[&"users", &USER_ID, &"posts"]), "/users/{user_id:[0-9]+}/posts");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
    pub const fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Parameter name, without any pattern
    pub fn name(&self) -> &'a str {
        self.0.split_once(':').map_or(self.0, |(name, _)| name)
    }

    /// Matching pattern after the `:`, if any
    pub fn pattern(&self) -> Option<&'a str> {
        self.0.split_once(':').map(|(_, pattern)| pattern)
    }

    /// Router placeholder form: `{name}` or `{name:pattern}`
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.0)
    }

    /// Reads this token's segment from matched route parameters
    pub fn get<'l, L>(&self, params: &'l L) -> Option<Cow<'l, str>>
    where
        L: QueryLookup + ?Sized,
    {
        params.lookup(self.name())
    }

    /// Segment parsed as a base-10 `i32`
    pub fn as_i32<L>(&self, params: &L) -> Result<i32, ParseError>
    where
        L: QueryLookup + ?Sized,
    {
        let raw = self.get(params).unwrap_or_default();
        raw.parse().map_err(|err| decimal_error(&raw, Kind::I32, err))
    }

    /// Segment parsed as a base-10 `i64`
    pub fn as_i64<L>(&self, params: &L) -> Result<i64, ParseError>
    where
        L: QueryLookup + ?Sized,
    {
        let raw = self.get(params).unwrap_or_default();
        raw.parse().map_err(|err| decimal_error(&raw, Kind::I64, err))
    }
}

fn decimal_error(raw: &str, kind: Kind, err: std::num::ParseIntError) -> ParseError {
    use std::num::IntErrorKind;

    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::range(raw, kind),
        _ => ParseError::syntax(raw, kind),
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can appear as one element of a route pattern
pub trait PatternElement {
    fn segment(&self) -> Cow<'_, str>;
}

impl PatternElement for Token<'_> {
    fn segment(&self) -> Cow<'_, str> {
        Cow::Owned(self.placeholder())
    }
}

impl PatternElement for str {
    fn segment(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl PatternElement for String {
    fn segment(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: PatternElement + ?Sized> PatternElement for &T {
    fn segment(&self) -> Cow<'_, str> {
        (**self).segment()
    }
}

macro_rules! impl_pattern_element_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PatternElement for $ty {
                fn segment(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_pattern_element_display!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, char);

/// Joins elements with `sep`, starting with a leading separator.
///
/// An empty element list produces an empty string.
pub fn join(sep: &str, elements: &[&dyn PatternElement]) -> String {
    let mut joined = String::new();
    for element in elements {
        joined.push_str(sep);
        joined.push_str(&element.segment());
    }
    joined
}

/// Builds a `/`-separated route pattern
pub fn pattern(elements: &[&dyn PatternElement]) -> String {
    join("/", elements)
}

/// `pattern!["users", USER_ID]` without spelling out the trait objects
#[macro_export]
macro_rules! pattern {
    ($($element:expr),* $(,)?) => {
        $crate::route::pattern(&[$(&$element as &dyn $crate::route::PatternElement),*])
    };
}
