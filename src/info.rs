use crate::refs::{ObjectReferences, RefType};
use chrono::{Datelike, Local, Offset, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Document metadata for the PDF's information dictionary.
///
/// Every field is optional and omitted from the document when unset. The
/// producer and creation date are filled in automatically when the
/// document serializes.
#[derive(Default, Debug, Clone)]
pub struct Info {
    title: Option<String>,
    author: Option<String>,
    subject: Option<String>,
    keywords: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Readers generally expect a comma-separated list
    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);
        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords));
        }
        info.producer(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " ",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(local_date());
    }
}

/// The current local time as a PDF date, UTC offset included
fn local_date() -> Date {
    let now = Local::now();
    let offset_seconds = now.offset().fix().local_minus_utc();
    Date::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour((offset_seconds / 3600) as i8)
        .utc_offset_minute(((offset_seconds % 3600) / 60).unsigned_abs() as u8)
}
