//! Logging sink for a fetched feed.
//!
//! Callers feed the same [`FeedResult`] here and into their response, so every asteroid a caller
//! receives also appears in the process log: one header line per date, then one line per asteroid.

use crate::domain::asteroid::FeedResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    Date {
        date: &'a str,
        count: usize,
    },
    Asteroid {
        date: &'a str,
        name: &'a str,
        hazardous: bool,
    },
}

impl std::fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportLine::Date { date, .. } => write!(f, "Date: {date}"),
            ReportLine::Asteroid {
                name, hazardous, ..
            } => write!(f, "- Name: {name}, Hazardous: {hazardous}"),
        }
    }
}

pub fn report_lines(result: &FeedResult) -> Vec<ReportLine<'_>> {
    let mut lines = Vec::with_capacity(result.len() + result.item_count());
    for (date, asteroids) in result.iter() {
        lines.push(ReportLine::Date {
            date,
            count: asteroids.len(),
        });
        lines.extend(asteroids.iter().map(|a| ReportLine::Asteroid {
            date,
            name: &a.name,
            hazardous: a.hazardous,
        }));
    }
    lines
}

pub fn log_feed_result(result: &FeedResult) {
    for line in report_lines(result) {
        match line {
            ReportLine::Date { date, count } => {
                tracing::info!(target: "neofeed::report", date, count, "{line}");
            }
            ReportLine::Asteroid {
                date,
                name,
                hazardous,
            } => {
                tracing::info!(target: "neofeed::report", date, name, hazardous, "{line}");
            }
        }
    }
}
