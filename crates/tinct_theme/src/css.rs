//! CSS text for persisted themes
//!
//! Derived themes are stored as two rule blocks of custom properties:
//!
//! ```css
//! [data-theme="sunset"] {
//!   --primary: oklch(0.6 0.2 30);
//! }
//! ```
//!
//! and the same under `.dark[data-theme="sunset"]` for the dark scheme.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{anychar, char, multispace1, none_of},
    combinator::{map, opt, recognize, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{fold_many1, many0},
    sequence::{delimited, pair, preceded},
    IResult,
};
use tracing::warn;

use crate::scheme::ColorScheme;

/// Selector scoping a theme's rules for one scheme
pub fn theme_selector(theme_id: &str, scheme: ColorScheme) -> String {
    match scheme {
        ColorScheme::Light => format!("[data-theme=\"{theme_id}\"]"),
        ColorScheme::Dark => format!(".dark[data-theme=\"{theme_id}\"]"),
    }
}

/// Render one rule block, one declaration per line
pub fn render_rule<'a>(
    selector: &str,
    declarations: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut css = format!("{selector} {{\n");
    for (name, value) in declarations {
        css.push_str("  ");
        css.push_str(name);
        css.push_str(": ");
        css.push_str(value);
        css.push_str(";\n");
    }
    css.push('}');
    css
}

/// One rule block: a selector and its custom-property declarations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    /// The scheme a rule applies to: dark when any compound selector carries
    /// the `.dark` class
    pub fn scheme(&self) -> ColorScheme {
        let has_dark_class = self
            .selector
            .split(|c: char| c.is_whitespace() || c == ',')
            .any(|compound| {
                // Classes come before any attribute or pseudo-class part
                let head = compound.split(['[', ':']).next().unwrap_or_default();
                head.split('.').skip(1).any(|class| class == "dark")
            });
        if has_dark_class {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// Split a stylesheet into rule blocks, keeping only `--name: value` declarations.
///
/// Comments are skipped and nested blocks are not supported. A malformed
/// rule is logged and skipped up to its closing brace.
pub fn parse_rules(css: &str) -> Vec<CssRule> {
    let mut rules = Vec::new();
    let mut input = css;

    loop {
        if let Ok((rest, ())) = ws(input) {
            input = rest;
        }
        if input.is_empty() {
            break;
        }

        match rule(input) {
            Ok((rest, parsed)) => {
                rules.push(parsed);
                input = rest;
            }
            Err(err) => {
                let (line, column) = position(css, input);
                warn!(
                    "Skipping malformed CSS rule at {}:{} (expected {})",
                    line,
                    column,
                    expected(&err)
                );
                match skip_rule(input) {
                    Ok((rest, _)) => input = rest,
                    Err(_) => break,
                }
            }
        }
    }

    rules
}

/// Custom-property declarations from every rule block, in source order.
///
/// Selectors are ignored; use this when the caller already knows which
/// scheme a stylesheet belongs to.
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
    parse_rules(css)
        .into_iter()
        .flat_map(|rule| rule.declarations)
        .collect()
}

// ============================================================================
// Parsers
// ============================================================================

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Whitespace and comments
fn ws(input: &str) -> ParseResult<()> {
    value(
        (),
        many0(alt((value((), multispace1), value((), parse_comment)))),
    )(input)
}

/// A block comment `/* ... */`
fn parse_comment(input: &str) -> ParseResult<&str> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

fn identifier(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// `--name`, leading dashes included
fn variable_name(input: &str) -> ParseResult<&str> {
    recognize(preceded(tag("--"), identifier))(input)
}

fn double_quoted(input: &str) -> ParseResult<&str> {
    recognize(delimited(
        char('"'),
        many0(alt((
            recognize(preceded(char('\\'), anychar)),
            recognize(none_of("\\\"")),
        ))),
        char('"'),
    ))(input)
}

fn single_quoted(input: &str) -> ParseResult<&str> {
    recognize(delimited(
        char('\''),
        many0(alt((
            recognize(preceded(char('\\'), anychar)),
            recognize(none_of("\\'")),
        ))),
        char('\''),
    ))(input)
}

/// A declaration value up to `;` or `}`. Quoted strings may contain either;
/// comments are dropped.
fn declaration_value(input: &str) -> ParseResult<String> {
    context(
        "declaration value",
        fold_many1(
            alt((
                map(parse_comment, |_| ""),
                context("quoted string", alt((double_quoted, single_quoted))),
                recognize(none_of(";{}\"'")),
            )),
            String::new,
            |mut acc, piece| {
                acc.push_str(piece);
                acc
            },
        ),
    )(input)
}

/// `name: value;`, yielding only custom properties with a value
fn declaration(input: &str) -> ParseResult<Option<(String, String)>> {
    let (input, name) = context(
        "property name",
        alt((map(variable_name, Some), map(identifier, |_| None))),
    )(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("colon after property name", char(':'))(input)?;
    let (input, _) = ws(input)?;
    let (input, value) = opt(declaration_value)(input)?;
    let (input, _) = opt(char(';'))(input)?;

    let value = value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    Ok((input, name.zip(value).map(|(name, value)| (name.to_string(), value))))
}

/// Anything in a rule body that is not a declaration, up to the next `;`
fn skipped_declaration(input: &str) -> ParseResult<Option<(String, String)>> {
    value(
        None,
        alt((recognize(pair(declaration_value, opt(char(';')))), tag(";"))),
    )(input)
}

/// `selector { declarations }`
fn rule(input: &str) -> ParseResult<CssRule> {
    let (input, selector) =
        context("selector", take_while(|c: char| c != '{' && c != '}'))(input)?;
    let (input, _) = context("opening brace", char('{'))(input)?;
    let (input, declarations) =
        many0(preceded(ws, alt((declaration, skipped_declaration))))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("closing brace", char('}'))(input)?;

    Ok((
        input,
        CssRule {
            selector: selector.trim().to_string(),
            declarations: declarations.into_iter().flatten().collect(),
        },
    ))
}

/// Resume point after a malformed rule
fn skip_rule(input: &str) -> ParseResult<&str> {
    recognize(pair(take_until("}"), char('}')))(input)
}

/// The innermost context a parse failed in
fn expected(err: &nom::Err<VerboseError<&str>>) -> &'static str {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e
            .errors
            .iter()
            .find_map(|(_, kind)| match kind {
                VerboseErrorKind::Context(ctx) => Some(*ctx),
                _ => None,
            })
            .unwrap_or("rule"),
        nom::Err::Incomplete(_) => "rule",
    }
}

/// 1-based line and column of `rest` within `original`
fn position(original: &str, rest: &str) -> (usize, usize) {
    let offset = original.len().saturating_sub(rest.len());
    let consumed = &original[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map(|pos| offset - pos)
        .unwrap_or(offset + 1);
    (line, column)
}
