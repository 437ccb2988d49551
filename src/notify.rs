//! Single-slot toast notifications. A new notice replaces the current one
//! outright; nothing is queued.

use std::time::Duration;

use crate::scheduler::{Scheduler, TaskId};
use crate::site::SiteEvent;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "notice-info",
            NoticeKind::Success => "notice-success",
            NoticeKind::Error => "notice-error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NoticeKind::Info => "info-circle",
            NoticeKind::Success => "check-circle",
            NoticeKind::Error => "exclamation-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
    pub phase: ToastPhase,
}

pub struct Toaster {
    current: Option<Toast>,
    timer: Option<TaskId>,
    next_id: u64,
    visible_for: Duration,
    exit_for: Duration,
}

impl Toaster {
    pub fn new(visible_for: Duration, exit_for: Duration) -> Self {
        Self {
            current: None,
            timer: None,
            next_id: 0,
            visible_for,
            exit_for,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn notify(&mut self, notice: Notice, scheduler: &mut dyn Scheduler<SiteEvent>) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!("toast {id}: {:?} {}", notice.kind, notice.message);
        self.current = Some(Toast {
            id,
            notice,
            phase: ToastPhase::Visible,
        });
        self.timer = Some(scheduler.schedule(self.visible_for, SiteEvent::ToastExpired(id)));
    }

    pub fn expire(&mut self, id: u64, scheduler: &mut dyn Scheduler<SiteEvent>) {
        let Some(toast) = self.current.as_mut().filter(|toast| toast.id == id) else {
            return;
        };
        toast.phase = ToastPhase::Leaving;
        self.timer = Some(scheduler.schedule(self.exit_for, SiteEvent::ToastRemoved(id)));
    }

    pub fn remove(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
            self.timer = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use pretty_assertions::assert_eq;

    fn toaster() -> Toaster {
        Toaster::new(Duration::from_millis(3000), Duration::from_millis(300))
    }

    fn drain(toaster: &mut Toaster, scheduler: &mut ManualScheduler<SiteEvent>, until_ms: u64) {
        let deadline = Duration::from_millis(until_ms);
        while let Some(event) = scheduler.next_due(deadline) {
            match event {
                SiteEvent::ToastExpired(id) => toaster.expire(id, scheduler),
                SiteEvent::ToastRemoved(id) => toaster.remove(id),
                other => panic!("unexpected event {other:?}"),
            }
        }
        scheduler.settle(deadline);
    }

    #[test]
    fn second_notice_replaces_the_first() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut toaster = toaster();
        toaster.notify(Notice::info("primo"), &mut scheduler);
        toaster.notify(Notice::error("secondo"), &mut scheduler);

        let toast = toaster.current().expect("toast shown");
        assert_eq!(toast.notice, Notice::error("secondo"));
        assert_eq!(toast.phase, ToastPhase::Visible);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn toast_leaves_after_visible_period_and_is_removed_after_exit() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut toaster = toaster();
        toaster.notify(Notice::success("fatto"), &mut scheduler);

        drain(&mut toaster, &mut scheduler, 2999);
        assert_eq!(toaster.current().map(|t| t.phase), Some(ToastPhase::Visible));

        drain(&mut toaster, &mut scheduler, 3000);
        assert_eq!(toaster.current().map(|t| t.phase), Some(ToastPhase::Leaving));

        drain(&mut toaster, &mut scheduler, 3299);
        assert!(toaster.current().is_some());
        drain(&mut toaster, &mut scheduler, 3300);
        assert!(toaster.current().is_none());
    }

    #[test]
    fn replaced_toast_timers_do_not_touch_the_successor() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut toaster = toaster();
        toaster.notify(Notice::info("vecchio"), &mut scheduler);
        drain(&mut toaster, &mut scheduler, 2000);
        toaster.notify(Notice::info("nuovo"), &mut scheduler);

        drain(&mut toaster, &mut scheduler, 4000);
        let toast = toaster.current().expect("successor still visible");
        assert_eq!(toast.notice.message, "nuovo");
        assert_eq!(toast.phase, ToastPhase::Visible);
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut scheduler: ManualScheduler<SiteEvent> = ManualScheduler::new();
        let mut toaster = toaster();
        toaster.notify(Notice::info("uno"), &mut scheduler);
        toaster.expire(42, &mut scheduler);
        toaster.remove(42);
        assert_eq!(toaster.current().map(|t| t.phase), Some(ToastPhase::Visible));
    }
}
