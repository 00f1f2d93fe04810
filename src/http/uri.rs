// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request URI templating
//!
//! Templates use `printf`-style conversions: `%s`, `%d`, the positional forms
//! `%1$s` / `%1$d`, and `%%` for a literal percent sign. A width may follow,
//! with `-` to left-justify or, for `%d`, `0` to zero-pad (`%05d`, `%2$-8s`).
//! Text arguments are percent-encoded before substitution and padding; other
//! values are inserted as-is.

use std::fmt;

use crate::error::{Error, Result};

/// One template argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriArg {
    /// Percent-encoded before substitution
    Text(String),
    /// Substituted verbatim
    Value(String),
}

impl UriArg {
    /// Wrap any displayable value for verbatim substitution
    pub fn value(value: impl fmt::Display) -> Self {
        UriArg::Value(value.to_string())
    }

    fn render(&self) -> String {
        match self {
            UriArg::Text(text) => encode_component(text),
            UriArg::Value(value) => value.clone(),
        }
    }
}

impl From<&str> for UriArg {
    fn from(s: &str) -> Self {
        UriArg::Text(s.to_string())
    }
}

impl From<String> for UriArg {
    fn from(s: String) -> Self {
        UriArg::Text(s)
    }
}

macro_rules! value_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for UriArg {
                fn from(v: $t) -> Self {
                    UriArg::value(v)
                }
            }
        )*
    };
}

value_arg!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, bool, char);

/// Parsed `[n$][flags][width]` part of a conversion
#[derive(Debug, Default)]
struct Conversion {
    position: Option<usize>,
    left_justify: bool,
    zero_pad: bool,
    width: usize,
}

impl Conversion {
    fn parse(spec: &str, template: &str) -> Result<Self> {
        let bad = || Error::invalid_argument(format!("Bad conversion '%{}' in '{}'", spec, template));
        let mut conversion = Conversion::default();

        let rest = match spec.split_once('$') {
            Some((index, rest)) => {
                let n: usize = index.parse().map_err(|_| bad())?;
                if n == 0 {
                    return Err(Error::invalid_argument(format!(
                        "Argument index must start at 1 in '{}'",
                        template
                    )));
                }
                conversion.position = Some(n - 1);
                rest
            }
            None => spec,
        };

        let width = rest.trim_start_matches(|c: char| {
            match c {
                '-' => conversion.left_justify = true,
                '0' => conversion.zero_pad = true,
                _ => return false,
            }
            true
        });

        if !width.is_empty() {
            conversion.width = width.parse().map_err(|_| bad())?;
        }
        if conversion.left_justify && (conversion.zero_pad || conversion.width == 0) {
            return Err(bad());
        }
        Ok(conversion)
    }

    fn pad(&self, rendered: String, numeric: bool) -> String {
        let len = rendered.chars().count();
        if len >= self.width {
            return rendered;
        }

        let fill = self.width - len;
        if self.left_justify {
            format!("{}{}", rendered, " ".repeat(fill))
        } else if self.zero_pad && numeric {
            match rendered.strip_prefix('-') {
                Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
                None => format!("{}{}", "0".repeat(fill), rendered),
            }
        } else {
            format!("{}{}", " ".repeat(fill), rendered)
        }
    }
}

/// Fill `template` with `args`
pub fn format_uri(template: &str, args: &[UriArg]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = String::new();
        while let Some(d) = chars
            .peek()
            .copied()
            .filter(|c| c.is_ascii_digit() || *c == '$' || *c == '-')
        {
            spec.push(d);
            chars.next();
        }
        let conversion = Conversion::parse(&spec, template)?;

        let numeric = match chars.next() {
            Some('s') => false,
            Some('d') => true,
            Some(other) => {
                return Err(Error::invalid_argument(format!(
                    "Unsupported conversion '%{}{}' in '{}'",
                    spec, other, template
                )))
            }
            None => {
                return Err(Error::invalid_argument(format!(
                    "Dangling '%' in '{}'",
                    template
                )))
            }
        };
        if conversion.zero_pad && !numeric {
            return Err(Error::invalid_argument(format!(
                "Zero padding needs %d in '{}'",
                template
            )));
        }

        let index = conversion.position.unwrap_or_else(|| {
            next_arg += 1;
            next_arg - 1
        });
        let arg = args.get(index).ok_or_else(|| {
            Error::invalid_argument(format!("Missing argument {} for '{}'", index + 1, template))
        })?;
        out.push_str(&conversion.pad(arg.render(), numeric));
    }

    Ok(out)
}

/// Percent-encode a URI component (UTF-8, unreserved characters kept)
pub fn encode_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
