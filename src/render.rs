use crate::caption::Caption;
use crate::error::Rejection;
use crate::session::Session;
use crate::timecode::Clock;

use std::io::Write;

use anyhow::Result;

pub fn write_page<W: Write>(buf: &mut W, session: &Session) -> Result<()> {
    writeln!(buf, "== Video Caption ==")?;
    if session.is_loaded() {
        writeln!(buf, "Video: {}", session.video_url())?;
        if !session.active_caption().is_empty() {
            writeln!(buf, "[overlay] {}", session.active_caption())?;
        }
        write_form(buf, session)?;
    }
    write_captions(buf, session)?;
    writeln!(buf)?;
    Ok(())
}

pub fn write_alert<W: Write>(buf: &mut W, rejection: Rejection) -> Result<()> {
    writeln!(buf, "alert: {}", rejection)?;
    Ok(())
}

fn write_form<W: Write>(buf: &mut W, session: &Session) -> Result<()> {
    let form = session.form();
    let button = if session.is_editing() {
        "Update Caption"
    } else {
        "Add Caption"
    };
    writeln!(
        buf,
        "[{}] caption: '{}' start: '{}' end: '{}'",
        button, form.text, form.start, form.end
    )?;
    Ok(())
}

fn write_captions<W: Write>(buf: &mut W, session: &Session) -> Result<()> {
    writeln!(buf, "Added Captions")?;
    if !session.is_loaded() {
        writeln!(
            buf,
            "Please Add Url and Load Video to add the captions in the video"
        )?;
    } else if session.captions().is_empty() {
        writeln!(buf, "No captions added yet. Add captions to see them here.")?;
    }
    for (index, caption) in session.captions().iter().enumerate() {
        write_caption(buf, index + 1, caption)?;
    }
    Ok(())
}

fn write_caption<W: Write>(buf: &mut W, number: usize, caption: &Caption) -> Result<()> {
    writeln!(
        buf,
        "{}. {} (Start: {} - End: {})",
        number,
        caption.text(),
        Clock(caption.start()),
        Clock(caption.end())
    )?;
    Ok(())
}
