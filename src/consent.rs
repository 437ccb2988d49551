//! Cookie consent: the persisted record and the banner lifecycle.
//!
//! The banner appears once per browser, a fixed delay after load, and only
//! while no decision is stored. Choosing persists `{status, timestamp}`; the
//! close control hides the banner for this page view only.

use std::time::Duration;

use crate::notify::Notice;
use crate::scheduler::{Scheduler, TaskId};
use crate::site::SiteEvent;
use crate::storage::{persist, PreferenceStore, CONSENT_KEY, CONSENT_TIMESTAMP_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentStatus {
    Accepted,
    Rejected,
}

impl ConsentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsentStatus::Accepted => "accepted",
            ConsentStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(ConsentStatus::Accepted),
            "rejected" => Some(ConsentStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsentRecord {
    pub status: ConsentStatus,
    pub timestamp_ms: i64,
}

impl ConsentRecord {
    /// Any stored status value counts as a decision; a missing or broken
    /// timestamp reads as 0.
    pub fn load(store: &dyn PreferenceStore) -> Option<Self> {
        let raw = store.get(CONSENT_KEY)?;
        let status = ConsentStatus::parse(&raw).unwrap_or(ConsentStatus::Rejected);
        let timestamp_ms = store
            .get(CONSENT_TIMESTAMP_KEY)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0);
        Some(Self {
            status,
            timestamp_ms,
        })
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) {
        persist(store, CONSENT_KEY, self.status.as_str());
        persist(store, CONSENT_TIMESTAMP_KEY, &self.timestamp_ms.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentPhase {
    Unseen,
    Shown,
    /// Closed without choosing; it comes back on the next load.
    Dismissed,
    Decided(ConsentRecord),
}

pub struct ConsentBanner {
    phase: ConsentPhase,
    exiting: bool,
    exit_for: Duration,
    reveal_timer: Option<TaskId>,
    exit_timer: Option<TaskId>,
}

impl ConsentBanner {
    pub fn boot(
        store: &dyn PreferenceStore,
        scheduler: &mut dyn Scheduler<SiteEvent>,
        delay: Duration,
        exit_for: Duration,
    ) -> Self {
        let (phase, reveal_timer) = match ConsentRecord::load(store) {
            Some(record) => (ConsentPhase::Decided(record), None),
            None => (
                ConsentPhase::Unseen,
                Some(scheduler.schedule(delay, SiteEvent::ConsentDelayElapsed)),
            ),
        };
        Self {
            phase,
            exiting: false,
            exit_for,
            reveal_timer,
            exit_timer: None,
        }
    }

    pub fn phase(&self) -> ConsentPhase {
        self.phase
    }

    /// True while the banner is on screen, including its exit animation.
    pub fn is_rendered(&self) -> bool {
        self.phase == ConsentPhase::Shown || self.exiting
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Whether the stored decision allows analytics cookies.
    pub fn analytics_allowed(&self) -> bool {
        matches!(
            self.phase,
            ConsentPhase::Decided(ConsentRecord {
                status: ConsentStatus::Accepted,
                ..
            })
        )
    }

    pub fn delay_elapsed(&mut self, store: &dyn PreferenceStore) {
        self.reveal_timer = None;
        if self.phase != ConsentPhase::Unseen {
            return;
        }
        self.phase = match ConsentRecord::load(store) {
            Some(record) => ConsentPhase::Decided(record),
            None => {
                tracing::debug!("consent: banner shown");
                ConsentPhase::Shown
            }
        };
    }

    pub fn decide(
        &mut self,
        status: ConsentStatus,
        store: &mut dyn PreferenceStore,
        scheduler: &mut dyn Scheduler<SiteEvent>,
    ) {
        let record = ConsentRecord {
            status,
            timestamp_ms: scheduler.now_ms(),
        };
        record.save(store);
        tracing::debug!("consent: {} at {}", status.as_str(), record.timestamp_ms);
        if let Some(timer) = self.reveal_timer.take() {
            scheduler.cancel(timer);
        }
        let was_shown = self.phase == ConsentPhase::Shown;
        self.phase = ConsentPhase::Decided(record);
        if was_shown {
            self.begin_exit(scheduler);
        }
    }

    pub fn accept_all(
        &mut self,
        store: &mut dyn PreferenceStore,
        scheduler: &mut dyn Scheduler<SiteEvent>,
    ) -> Notice {
        self.decide(ConsentStatus::Accepted, store, scheduler);
        Notice::success("Preferenze cookie salvate: tutti accettati")
    }

    pub fn reject_all(
        &mut self,
        store: &mut dyn PreferenceStore,
        scheduler: &mut dyn Scheduler<SiteEvent>,
    ) -> Notice {
        self.decide(ConsentStatus::Rejected, store, scheduler);
        Notice::success("Cookie di terze parti rifiutati")
    }

    /// Saves the choice made in the settings modal.
    pub fn save_custom(
        &mut self,
        analytics: bool,
        store: &mut dyn PreferenceStore,
        scheduler: &mut dyn Scheduler<SiteEvent>,
    ) -> Notice {
        let status = if analytics {
            ConsentStatus::Accepted
        } else {
            ConsentStatus::Rejected
        };
        self.decide(status, store, scheduler);
        Notice::success("Preferenze cookie salvate")
    }

    pub fn dismiss(&mut self, scheduler: &mut dyn Scheduler<SiteEvent>) {
        if self.phase != ConsentPhase::Shown {
            return;
        }
        self.phase = ConsentPhase::Dismissed;
        self.begin_exit(scheduler);
    }

    /// Shows the banner again so an earlier choice can be changed.
    pub fn reopen(&mut self, scheduler: &mut dyn Scheduler<SiteEvent>) {
        for timer in [self.reveal_timer.take(), self.exit_timer.take()]
            .into_iter()
            .flatten()
        {
            scheduler.cancel(timer);
        }
        self.exiting = false;
        self.phase = ConsentPhase::Shown;
    }

    pub fn exit_finished(&mut self) {
        self.exiting = false;
        self.exit_timer = None;
    }

    fn begin_exit(&mut self, scheduler: &mut dyn Scheduler<SiteEvent>) {
        self.exiting = true;
        self.exit_timer = Some(scheduler.schedule(self.exit_for, SiteEvent::ConsentBannerRemoved));
    }
}
