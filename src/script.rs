//! Event scripts: one page interaction per line.
//!
//! ```text
//! # comment
//! url https://example.com/video.mp4
//! load
//! add 0:10 0:20 Hello there
//! time 12.5 95
//! edit 1
//! start 0:12
//! submit
//! show
//! ```

use crate::error::ScriptError;

use anyhow::Context;
use nom::bytes::complete::take_till1;
use nom::character::complete::{alpha1, digit1, space1};
use nom::combinator::{eof, map, map_res, opt, rest, verify};
use nom::error::{convert_error, VerboseError, VerboseErrorKind};
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::{Err, IResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Url(String),
    Load,
    Time { position: f64, duration: Option<f64> },
    Text(String),
    Start(String),
    End(String),
    Submit,
    Add { start: String, end: String, text: String },
    /// Zero-based list position.
    Edit(usize),
    /// Zero-based list position.
    Delete(usize),
    Show,
}

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    pub fn parse(&mut self, input: &str) -> Result<Vec<Event>, anyhow::Error> {
        let mut events = Vec::new();
        for (number, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match event(line) {
                Ok((_, event)) => events.push(event),
                Err(Err::Error(err)) | Err(Err::Failure(err)) => {
                    let conv = convert_error(line, err);
                    return Err(ScriptError::ParseError(conv))
                        .context(format!("Invalid event on line {}", number + 1));
                }
                Err(Err::Incomplete(_)) => {
                    unreachable!("Incomplete data received by non-streaming parser.")
                }
            }
        }
        Ok(events)
    }
}

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

fn event(input: &str) -> Res<Event> {
    let (args, keyword) = alpha1(input)?;
    let (args, event) = match keyword {
        "url" => map(field, Event::Url)(args)?,
        "load" => (args, Event::Load),
        "time" => time(args)?,
        "text" => map(field, Event::Text)(args)?,
        "start" => map(field, Event::Start)(args)?,
        "end" => map(field, Event::End)(args)?,
        "submit" => (args, Event::Submit),
        "add" => add(args)?,
        "edit" => map(position, Event::Edit)(args)?,
        "delete" => map(position, Event::Delete)(args)?,
        "show" => (args, Event::Show),
        _ => {
            return Err(Err::Failure(VerboseError {
                errors: vec![(input, VerboseErrorKind::Context("unknown command"))],
            }))
        }
    };
    let (args, _) = eof(args)?;
    Ok((args, event))
}

/// Free text after the keyword; absent means empty.
fn field(input: &str) -> Res<String> {
    map(opt(preceded(space1, rest)), |s: Option<&str>| {
        s.unwrap_or("").to_string()
    })(input)
}

fn token(input: &str) -> Res<String> {
    map(
        preceded(space1, take_till1(|c: char| c.is_whitespace())),
        String::from,
    )(input)
}

fn time(input: &str) -> Res<Event> {
    let (input, position) = preceded(space1, double)(input)?;
    let (input, duration) = opt(preceded(space1, double))(input)?;
    Ok((input, Event::Time { position, duration }))
}

fn add(input: &str) -> Res<Event> {
    let (input, (start, end, text)) = tuple((token, token, field))(input)?;
    Ok((input, Event::Add { start, end, text }))
}

/// A 1-based list position as displayed, returned zero-based.
fn position(input: &str) -> Res<usize> {
    map(
        preceded(
            space1,
            verify(map_res(digit1, |s: &str| s.parse::<usize>()), |n: &usize| *n >= 1),
        ),
        |n| n - 1,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Event> {
        Parser::new().parse(input).unwrap()
    }

    macro_rules! test_event {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                let (_, parsed) = event(input).unwrap();

                assert_eq!(parsed, expected);
            }
        )*
        }
    }

    test_event! {
        test_event_0: ("load", Event::Load),
        test_event_1: ("url https://example.com/a.mp4", Event::Url("https://example.com/a.mp4".to_string())),
        test_event_2: ("url", Event::Url(String::new())),
        test_event_3: ("time 12.5", Event::Time { position: 12.5, duration: None }),
        test_event_4: ("time 3 95.25", Event::Time { position: 3.0, duration: Some(95.25) }),
        test_event_5: ("text Hello,  world", Event::Text("Hello,  world".to_string())),
        test_event_6: ("start 01:02:03", Event::Start("01:02:03".to_string())),
        test_event_7: ("end", Event::End(String::new())),
        test_event_8: ("edit 1", Event::Edit(0)),
        test_event_9: ("delete 12", Event::Delete(11)),
        test_event_10: ("add 0:10 0:20 Hi there", Event::Add {
            start: "0:10".to_string(),
            end: "0:20".to_string(),
            text: "Hi there".to_string(),
        }),
        test_event_11: ("add 0:10 0:20", Event::Add {
            start: "0:10".to_string(),
            end: "0:20".to_string(),
            text: String::new(),
        }),
        test_event_12: ("submit", Event::Submit),
        test_event_13: ("show", Event::Show),
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let events = parse("# setup\n\n  url clip.mp4\nload\r\n   # done\n");
        assert_eq!(events, vec![Event::Url("clip.mp4".to_string()), Event::Load]);
    }

    #[test]
    fn rejects_bad_lines() {
        for line in &["jump 1", "edit 0", "edit one", "time", "load now", "submit!", "delete", "add 0:10"] {
            assert!(Parser::new().parse(line).is_err(), "{}", line);
        }
    }

    #[test]
    fn error_names_line_number() {
        let err = Parser::new().parse("load\nbogus\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid event on line 2");
        assert!(err.chain().nth(1).is_some());
    }
}
