mod caption;
mod config;
mod error;
mod playback;
mod render;
mod script;
mod session;
mod store;
mod timecode;
mod validator;

use crate::config::Settings;
use crate::playback::Boundary;
use crate::script::{Event, Parser};
use crate::session::Session;
use crate::validator::Policy;

use std::io::{self, BufWriter, Read, Write};

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use env_logger::{Builder, Env};
use log::{debug, warn};

fn main() {
    init_logger();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

fn init_logger() {
    Builder::from_env(Env::default().filter_or("RUST_LOG", "warn"))
        .target(env_logger::Target::Stderr)
        .init();
}

#[derive(ClapParser)]
#[command(about = "Replay caption editing events against a video and show the result")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The event script to read. If not supplied, events will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write the rendered page to. If not supplied, it will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Write the final session state as JSON to the specified file."
    )]
    state: Option<String>,
    #[arg(long, help = "Accept a caption starting at exactly 0:00.")]
    allow_zero_start: bool,
    #[arg(
        long,
        help = "Stop showing a caption at its end time instead of through it."
    )]
    half_open_playback: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            validation: Policy {
                allow_zero_start: self.allow_zero_start,
            },
            playback: if self.half_open_playback {
                Boundary::HalfOpen
            } else {
                Boundary::Inclusive
            },
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let events = Parser::new()
        .parse(&data)
        .context(format!("Failed to parse event script: '{}'", cli.input))?;
    if events.is_empty() {
        return Err(anyhow!("You appear to have supplied an empty script."));
    }

    let mut session = Session::new(cli.settings());

    if cli.output == "-" {
        let stdout = io::stdout();
        let mut dst = BufWriter::new(stdout.lock());
        replay(&mut session, events, &mut dst)?;
        dst.flush().context("Failed to write to standard output.")?;
    } else {
        let file = std::fs::File::create(&cli.output)
            .context(format!("Failed to create output file: '{}'", cli.output))?;
        let mut dst = BufWriter::new(file);
        replay(&mut session, events, &mut dst)?;
        dst.flush().context("Failed to write to output file.")?;
    }

    if let Some(state_path) = cli.state {
        let file = std::fs::File::create(&state_path)
            .context(format!("Failed to create state file: '{}'", state_path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &session)
            .context("Failed to write session state.")?;
    }

    Ok(())
}

/// Feeds every event to `session`, writing alerts and rendered pages to `out`.
fn replay<W: Write>(session: &mut Session, events: Vec<Event>, out: &mut W) -> Result<()> {
    for event in events {
        debug!("{:?}", event);
        match event {
            Event::Url(url) => session.set_video_url(&url),
            Event::Load => {
                session.load_video();
            }
            Event::Time { position, duration } => session.time_update(position, duration),
            Event::Text(text) => session.set_text(&text),
            Event::Start(start) => session.set_start(&start),
            Event::End(end) => session.set_end(&end),
            Event::Submit => submit(session, out)?,
            Event::Add { start, end, text } => {
                session.set_text(&text);
                session.set_start(&start);
                session.set_end(&end);
                submit(session, out)?;
            }
            Event::Edit(index) => {
                if let Err(err) = session.begin_edit(index) {
                    warn!("Cannot edit: {}", err);
                }
            }
            Event::Delete(index) => {
                if let Err(err) = session.delete(index) {
                    warn!("Cannot delete: {}", err);
                }
            }
            Event::Show => render::write_page(out, session)?,
        }
    }
    Ok(())
}

fn submit<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    if let Err(rejection) = session.submit() {
        render::write_alert(out, rejection)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Session, String) {
        let events = Parser::new().parse(script).unwrap();
        let mut session = Session::new(Settings::default());
        let mut buf = Cursor::new(vec![]);
        replay(&mut session, events, &mut buf).expect("Failed to write to buffer");
        (session, String::from_utf8(buf.into_inner()).unwrap())
    }

    #[test]
    fn overlap_raises_alert_and_keeps_going() {
        let (session, out) = run_script(
            "url clip.mp4\n\
             load\n\
             add 0:10 0:20 first\n\
             add 0:15 0:25 clash\n\
             add 0:20 0:30 second\n",
        );
        assert_eq!(
            out,
            "alert: The time range overlaps with an existing caption. \
             Please choose a different time range or edit the existing caption.\n"
        );
        assert_eq!(session.captions().len(), 2);
    }

    #[test]
    fn full_session() {
        let (_, out) = run_script(
            "url clip.mp4\n\
             load\n\
             time 0 100\n\
             add 0:10 0:20 Hello\n\
             add 1:00 2:00 Too long\n\
             edit 1\n\
             text Hi\n\
             submit\n\
             time 20\n\
             show\n",
        );
        assert_eq!(
            out,
            "alert: End time exceeds video duration. Please enter a valid end time.\n\
             == Video Caption ==\n\
             Video: clip.mp4\n\
             [overlay] Hi\n\
             [Add Caption] caption: '' start: '' end: ''\n\
             Added Captions\n\
             1. Hi (Start: 0:10 - End: 0:20)\n\n"
        );
    }

    #[test]
    fn new_url_starts_over() {
        let (session, out) = run_script(
            "url a.mp4\n\
             load\n\
             add 0:10 0:20 Hello\n\
             url b.mp4\n\
             show\n",
        );
        assert!(session.captions().is_empty());
        assert!(out.ends_with("Please Add Url and Load Video to add the captions in the video\n\n"));
    }

    #[test]
    fn captions_need_a_loaded_video() {
        let (session, out) = run_script("add 0:10 0:20 ghost\nshow\n");
        assert!(session.captions().is_empty());
        assert_eq!(
            out,
            "== Video Caption ==\n\
             Added Captions\n\
             Please Add Url and Load Video to add the captions in the video\n\n"
        );
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let (session, out) = run_script("url a.mp4\nload\nedit 3\ndelete 1\n");
        assert!(out.is_empty());
        assert!(!session.is_editing());
    }
}
