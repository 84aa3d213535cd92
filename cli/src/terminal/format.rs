use colored::*;
use subprobe_common::models::live_host::LiveHostRecord;

use crate::terminal::colors;

pub const TITLE_PREVIEW_LEN: usize = 50;

pub type Detail = (String, ColoredString);

pub fn status_to_colored(status: Option<u16>) -> ColoredString {
    match status {
        Some(code @ 200..=299) => code.to_string().color(colors::STATUS_OK),
        Some(code @ 300..=399) => code.to_string().color(colors::STATUS_REDIRECT),
        Some(code) => code.to_string().color(colors::STATUS_ERROR),
        None => "N/A".color(colors::MISSING),
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn record_to_details(record: &LiveHostRecord) -> Vec<Detail> {
    let title: ColoredString = match record.title.as_deref() {
        Some(title) => truncate(title, TITLE_PREVIEW_LEN).color(colors::TEXT_DEFAULT),
        None => "N/A".color(colors::MISSING),
    };

    let mut details: Vec<Detail> = vec![
        (String::from("Status"), status_to_colored(record.status_code)),
        (String::from("Title"), title),
    ];

    if !record.technologies.is_empty() {
        details.push((String::from("Tech"), record.technologies.join(", ").normal()));
    }
    details
}
