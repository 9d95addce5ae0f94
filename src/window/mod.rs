//! Input/output reference parsing.
//!
//! A job's `inputs` and `output` attributes are comma-separated lists of
//! references. Each reference resolves to an `IoWindow`, whose `name` is the
//! key used to match consumers with producers.
//!
//! Two syntaxes:
//! - `Plain` (default): the whole token, lower-cased, is the name.
//! - `Window`: `tablename (window <size> delay <offset> [primary])`.
//!   Size/delay/primary are parsed and validated but never affect the graph.

use anyhow::{Context, bail};
use regex::Regex;
use std::fmt;

/// Window size reported for plain references (effectively unbounded).
pub const UNBOUNDED_SIZE: i64 = 999_999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoWindow {
    pub name: String,
    pub size: i64,
    pub delay: i64,
    pub primary: bool,
}

impl IoWindow {
    pub fn plain(name: String) -> Self {
        Self {
            name,
            size: UNBOUNDED_SIZE,
            delay: 0,
            primary: false,
        }
    }
}

impl fmt::Display for IoWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}_{}", self.name, self.size, self.delay, self.primary)
    }
}

/// Producer-table key for a plain name.
pub fn canonical_name(token: &str) -> String {
    token.to_lowercase()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefSyntax {
    #[default]
    Plain,
    Window,
}

/// Reference parser for one graph build. Compiles its pattern once.
#[derive(Debug)]
pub struct RefParser {
    window_re: Option<Regex>,
}

impl RefParser {
    pub fn new(syntax: RefSyntax) -> anyhow::Result<Self> {
        let window_re = match syntax {
            RefSyntax::Plain => None,
            // name up to the first '(' and the window body up to the first ')'.
            RefSyntax::Window => Some(Regex::new(r"^([^(]*)\(([^)]*)\)")?),
        };
        Ok(Self { window_re })
    }

    pub fn parse(&self, token: &str) -> anyhow::Result<IoWindow> {
        let def = canonical_name(token);
        match &self.window_re {
            None => Ok(IoWindow::plain(def)),
            Some(re) => parse_window(re, &def)
                .with_context(|| format!("syntax error in window definition {:?}", token)),
        }
    }
}

fn parse_window(re: &Regex, def: &str) -> anyhow::Result<IoWindow> {
    let Some(caps) = re.captures(def) else {
        bail!(
            "window start or end is missing; a window definition should look like \
             \"tablename (window 120 delay 60 primary)\""
        );
    };

    let name = caps[1].trim().to_string();
    let fields: Vec<&str> = caps[2].split_whitespace().collect();
    if fields.len() < 2 || fields.len() > 5 {
        bail!("expected 2 to 5 fields in window, found {}", fields.len());
    }

    let mut w = IoWindow {
        name,
        size: 0,
        delay: 0,
        primary: false,
    };

    let mut it = fields.iter();
    while let Some(&field) = it.next() {
        match field {
            "window" => w.size = int_arg(field, it.next())?,
            "delay" => w.delay = int_arg(field, it.next())?,
            "primary" => w.primary = true,
            other => bail!("token {:?} not allowed in window definition", other),
        }
    }

    Ok(w)
}

fn int_arg(keyword: &str, arg: Option<&&str>) -> anyhow::Result<i64> {
    let Some(arg) = arg else {
        bail!("{:?} not followed by an integer", keyword);
    };
    arg.parse::<i64>()
        .with_context(|| format!("{:?} not followed by an integer", keyword))
}
