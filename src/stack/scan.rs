use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, space1},
    combinator::{all_consuming, map, recognize, rest, verify},
    error::{context, VerboseError},
    multi::many0,
    sequence::{preceded, terminated},
};

pub type IResult<I, O> = nom::IResult<I, O, VerboseError<I>>;

/// Line ending with `\n`, the newline is consumed but not returned.
///
/// ```rust
/// use gqlerrors::stack::scan::terminated_line;
///
/// assert_eq!(terminated_line("main.rs:10\nrest"), Ok(("rest", "main.rs:10")));
/// assert_eq!(terminated_line("\nrest"), Ok(("rest", "")));
/// assert!(terminated_line("no newline").is_err());
/// ```
pub fn terminated_line<'a>(input: &'a str) -> IResult<&'a str, &'a str> {
    context("terminated line", terminated(take_until("\n"), char('\n')))(input)
}

/// Non-empty tail without a newline.
///
/// ```rust
/// use gqlerrors::stack::scan::last_line;
///
/// assert_eq!(last_line("tail"), Ok(("", "tail")));
/// assert!(last_line("").is_err());
/// ```
pub fn last_line<'a>(input: &'a str) -> IResult<&'a str, &'a str> {
    context("last line", verify(rest, |s: &str| !s.is_empty()))(input)
}

/// Single stack line with a trailing carriage return dropped.
///
/// ```rust
/// use gqlerrors::stack::scan::line;
///
/// assert_eq!(line("a\r\nb"), Ok(("b", "a")));
/// assert_eq!(line("a\nb"), Ok(("b", "a")));
/// assert_eq!(line("b"), Ok(("", "b")));
/// ```
pub fn line<'a>(input: &'a str) -> IResult<&'a str, &'a str> {
    map(alt((terminated_line, last_line)), |l: &str| {
        l.strip_suffix('\r').unwrap_or(l)
    })(input)
}

/// All lines of a stack dump.
///
/// A trailing newline does not produce an empty last line.
///
/// ```rust
/// use gqlerrors::stack::scan::stack_lines;
///
/// assert_eq!(stack_lines("a\nb\n"), Ok(("", vec!["a", "b"])));
/// assert_eq!(stack_lines("a\n\nb"), Ok(("", vec!["a", "", "b"])));
/// assert_eq!(stack_lines(""), Ok(("", vec![])));
/// ```
pub fn stack_lines<'a>(input: &'a str) -> IResult<&'a str, Vec<&'a str>> {
    context("stack", all_consuming(many0(line)))(input)
}

/// Splits a stack dump into lines.
pub fn lines(mut input: &str) -> Vec<&str> {
    let mut out = Vec::new();
    while let Ok((remaining, l)) = line(input) {
        out.push(l);
        input = remaining;
    }
    out
}

/// Indented `at <file>:<line>` line printed under a frame symbol.
///
/// ```rust
/// use gqlerrors::stack::scan::frame_location;
///
/// assert_eq!(frame_location("             at ./src/main.rs:4:5"), Ok(("./src/main.rs:4:5", "             at ")));
/// assert!(frame_location("   1: app::main").is_err());
/// assert!(frame_location("at unindented").is_err());
/// ```
pub fn frame_location<'a>(input: &'a str) -> IResult<&'a str, &'a str> {
    context("frame location", recognize(preceded(space1, tag("at "))))(input)
}

/// Groups lines into frames: a symbol line followed by its location lines.
/// Any other line forms a frame of its own.
pub fn frames<'l, 'a>(lines: &'l [&'a str]) -> Vec<&'l [&'a str]> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, l) in lines.iter().enumerate().skip(1) {
        if frame_location(l).is_err() {
            out.push(&lines[start..i]);
            start = i;
        }
    }
    if start < lines.len() {
        out.push(&lines[start..]);
    }
    out
}
