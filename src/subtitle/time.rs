//! Разбор и форматирование временных меток трёх форматов.
//!
//! - SRT: `HH:MM:SS,mmm`
//! - VTT: `HH:MM:SS.mmm` (часы при разборе необязательны)
//! - ASS: `H:MM:SS.cc`, сотые доли секунды, часы без ведущего нуля

use std::time::Duration;

use crate::error::{Error, ErrorType, Result};
use crate::subtitle::patterns::{ASS_TIME, SRT_TIME, VTT_TIME};
use crate::subtitle::SubtitleFormat;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

fn parse_field(value: &str, name: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::new(ErrorType::MalformedTime, &format!("invalid {}: {:?}", name, value)))
}

fn compose(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Result<Duration> {
    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|total| total.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
        .and_then(|total| total.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
        .and_then(|total| total.checked_add(millis))
        .map(Duration::from_millis)
        .ok_or_else(|| {
            Error::MalformedTime(format!(
                "time out of range: {}:{}:{}.{}",
                hours, minutes, seconds, millis
            ))
        })
}

/// Разбирает время SRT из отдельных полей
pub fn parse_srt_time(hours: &str, minutes: &str, seconds: &str, milliseconds: &str) -> Result<Duration> {
    compose(
        parse_field(hours, "hours")?,
        parse_field(minutes, "minutes")?,
        parse_field(seconds, "seconds")?,
        parse_field(milliseconds, "milliseconds")?,
    )
}

/// Разбирает время VTT из отдельных полей; пустое поле часов означает ноль
pub fn parse_vtt_time(hours: &str, minutes: &str, seconds: &str, milliseconds: &str) -> Result<Duration> {
    let hours = if hours.is_empty() { 0 } else { parse_field(hours, "hours")? };
    compose(
        hours,
        parse_field(minutes, "minutes")?,
        parse_field(seconds, "seconds")?,
        parse_field(milliseconds, "milliseconds")?,
    )
}

/// Разбирает время ASS из отдельных полей; сотые переводятся в миллисекунды
pub fn parse_ass_time(hours: &str, minutes: &str, seconds: &str, centiseconds: &str) -> Result<Duration> {
    let centis = parse_field(centiseconds, "centiseconds")?;
    compose(
        parse_field(hours, "hours")?,
        parse_field(minutes, "minutes")?,
        parse_field(seconds, "seconds")?,
        centis.checked_mul(10).ok_or_else(|| Error::MalformedTime(centiseconds.to_string()))?,
    )
}

struct Parts {
    hours: u128,
    minutes: u128,
    seconds: u128,
    millis: u128,
}

fn split(time: Duration) -> Parts {
    let total = time.as_millis();
    Parts {
        hours: total / MS_PER_HOUR as u128,
        minutes: (total / MS_PER_MINUTE as u128) % 60,
        seconds: (total / MS_PER_SECOND as u128) % 60,
        millis: total % MS_PER_SECOND as u128,
    }
}

/// Форматирует время как `HH:MM:SS,mmm`
pub fn format_srt_time(time: Duration) -> String {
    let p = split(time);
    format!("{:02}:{:02}:{:02},{:03}", p.hours, p.minutes, p.seconds, p.millis)
}

/// Форматирует время как `HH:MM:SS.mmm`
pub fn format_vtt_time(time: Duration) -> String {
    let p = split(time);
    format!("{:02}:{:02}:{:02}.{:03}", p.hours, p.minutes, p.seconds, p.millis)
}

/// Форматирует время как `H:MM:SS.cc`; миллисекунды отбрасываются до сотых
pub fn format_ass_time(time: Duration) -> String {
    let p = split(time);
    format!("{}:{:02}:{:02}.{:02}", p.hours, p.minutes, p.seconds, p.millis / 10)
}

/// Разбирает одиночную временную метку указанного формата
pub fn parse_time(format: SubtitleFormat, literal: &str) -> Result<Duration> {
    let literal = literal.trim();
    let malformed = || Error::MalformedTime(literal.to_string());
    match format {
        SubtitleFormat::Srt => {
            let c = SRT_TIME.captures(literal).ok_or_else(malformed)?;
            parse_srt_time(&c[1], &c[2], &c[3], &c[4])
        }
        SubtitleFormat::Vtt => {
            let c = VTT_TIME.captures(literal).ok_or_else(malformed)?;
            let hours = c.get(1).map_or("", |m| m.as_str());
            parse_vtt_time(hours, &c[2], &c[3], &c[4])
        }
        SubtitleFormat::Ass => {
            let c = ASS_TIME.captures(literal).ok_or_else(malformed)?;
            parse_ass_time(&c[1], &c[2], &c[3], &c[4])
        }
        SubtitleFormat::Unknown => Err(Error::UnsupportedFormat(format)),
    }
}

/// Форматирует временную метку в синтаксисе указанного формата
pub fn format_time(format: SubtitleFormat, time: Duration) -> Result<String> {
    match format {
        SubtitleFormat::Srt => Ok(format_srt_time(time)),
        SubtitleFormat::Vtt => Ok(format_vtt_time(time)),
        SubtitleFormat::Ass => Ok(format_ass_time(time)),
        SubtitleFormat::Unknown => Err(Error::UnsupportedFormat(format)),
    }
}
