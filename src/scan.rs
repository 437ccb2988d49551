//! Scripted website scan. The input URL is validated for real; the findings
//! are a fixed showcase and never depend on it.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::notify::Notice;
use crate::scheduler::{Scheduler, TaskId};
use crate::site::SiteEvent;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Inserisci un URL valido")]
    Empty,
    #[error("URL non valido. Usa il formato: https://example.com")]
    Malformed(#[from] url::ParseError),
}

/// Accepts only absolute URLs, the same inputs `new URL(..)` accepts without
/// a base.
pub fn validate_target(input: &str) -> Result<Url, ScanError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScanError::Empty);
    }
    Ok(Url::parse(trimmed)?)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Danger,
    Warning,
    Info,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Primary => "tone-primary",
            Tone::Danger => "tone-danger",
            Tone::Warning => "tone-warning",
            Tone::Info => "tone-info",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatTile {
    pub value: u32,
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComplianceCheck {
    pub passed: bool,
    pub label: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerFinding {
    pub name: &'static str,
    pub domain: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub stats: [StatTile; 4],
    pub compliance: [ComplianceCheck; 3],
    pub trackers: [TrackerFinding; 3],
}

pub static SHOWCASE_REPORT: ScanReport = ScanReport {
    stats: [
        StatTile {
            value: 14,
            label: "Cookie Totali",
            tone: Tone::Primary,
        },
        StatTile {
            value: 9,
            label: "Cookie Terze Parti",
            tone: Tone::Danger,
        },
        StatTile {
            value: 5,
            label: "Cookie Prime Parti",
            tone: Tone::Warning,
        },
        StatTile {
            value: 3,
            label: "Tracker Rilevati",
            tone: Tone::Info,
        },
    ],
    compliance: [
        ComplianceCheck {
            passed: true,
            label: "Banner cookie presente",
        },
        ComplianceCheck {
            passed: false,
            label: "Consenso non granulare",
        },
        ComplianceCheck {
            passed: true,
            label: "Informativa privacy accessibile",
        },
    ],
    trackers: [
        TrackerFinding {
            name: "Google Analytics",
            domain: "analytics.google.com",
        },
        TrackerFinding {
            name: "Facebook Pixel",
            domain: "connect.facebook.net",
        },
        TrackerFinding {
            name: "Google Tag Manager",
            domain: "googletagmanager.com",
        },
    ],
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Loading { target: String },
    Complete { target: String },
}

pub struct ScanSimulator {
    state: ScanState,
    generation: u64,
    pending: Option<TaskId>,
    delay: Duration,
}

impl ScanSimulator {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: ScanState::Idle,
            generation: 0,
            pending: None,
            delay,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn report(&self) -> Option<&'static ScanReport> {
        match self.state {
            ScanState::Complete { .. } => Some(&SHOWCASE_REPORT),
            _ => None,
        }
    }

    /// Invalid input leaves the current state untouched. A scan started while
    /// another is loading replaces it.
    pub fn start(
        &mut self,
        input: &str,
        scheduler: &mut dyn Scheduler<SiteEvent>,
    ) -> Result<(), ScanError> {
        validate_target(input)?;
        if let Some(task) = self.pending.take() {
            scheduler.cancel(task);
        }
        self.generation += 1;
        let target = input.trim().to_string();
        tracing::debug!("scan {}: loading {target}", self.generation);
        self.state = ScanState::Loading { target };
        self.pending = Some(scheduler.schedule(self.delay, SiteEvent::ScanFinished(self.generation)));
        Ok(())
    }

    pub fn finish(&mut self, generation: u64) -> Option<Notice> {
        if generation != self.generation {
            return None;
        }
        self.pending = None;
        let ScanState::Loading { target } = &self.state else {
            return None;
        };
        self.state = ScanState::Complete {
            target: target.clone(),
        };
        Some(Notice::success("Scansione completata!"))
    }

    pub fn download_report(&self) -> Notice {
        Notice::success("Report PDF generato e scaricato")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use pretty_assertions::assert_eq;

    fn finish_due(scan: &mut ScanSimulator, scheduler: &mut ManualScheduler<SiteEvent>, until_ms: u64) {
        while let Some(event) = scheduler.next_due(Duration::from_millis(until_ms)) {
            match event {
                SiteEvent::ScanFinished(generation) => {
                    scan.finish(generation);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_empty_and_relative_input() {
        assert!(matches!(validate_target("   "), Err(ScanError::Empty)));
        assert!(matches!(validate_target("not a url"), Err(ScanError::Malformed(_))));
        assert!(matches!(validate_target("example.com"), Err(ScanError::Malformed(_))));
        assert_eq!(
            ScanError::Empty.to_string(),
            "Inserisci un URL valido"
        );
        assert!(validate_target(" https://example.com/path ").is_ok());
    }

    #[test]
    fn invalid_input_never_enters_loading() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut scan = ScanSimulator::new(Duration::from_millis(2000));
        assert!(scan.start("not a url", &mut scheduler).is_err());
        assert_eq!(scan.state(), &ScanState::Idle);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn valid_input_loads_then_completes_after_delay() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut scan = ScanSimulator::new(Duration::from_millis(2000));
        scan.start("https://example.com", &mut scheduler).expect("valid url");
        assert_eq!(
            scan.state(),
            &ScanState::Loading {
                target: "https://example.com".to_string()
            }
        );

        finish_due(&mut scan, &mut scheduler, 1999);
        assert!(scan.report().is_none());
        finish_due(&mut scan, &mut scheduler, 2000);
        assert_eq!(scan.report(), Some(&SHOWCASE_REPORT));
    }

    #[test]
    fn rescanning_supersedes_the_pending_scan() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut scan = ScanSimulator::new(Duration::from_millis(2000));
        scan.start("https://first.example", &mut scheduler).expect("valid url");
        assert_eq!(scan.finish(99), None);
        scan.start("https://second.example", &mut scheduler).expect("valid url");
        assert_eq!(scheduler.pending_count(), 1);

        finish_due(&mut scan, &mut scheduler, 5000);
        assert_eq!(
            scan.state(),
            &ScanState::Complete {
                target: "https://second.example".to_string()
            }
        );
    }

    #[test]
    fn findings_are_fixed() {
        let totals: Vec<u32> = SHOWCASE_REPORT.stats.iter().map(|tile| tile.value).collect();
        assert_eq!(totals, vec![14, 9, 5, 3]);
        assert_eq!(SHOWCASE_REPORT.trackers.len(), 3);
    }
}
