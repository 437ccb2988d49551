use std::time::Duration;

use crate::notify::Notice;
use crate::scheduler::{Scheduler, TaskId};
use crate::site::SiteEvent;

pub const STEP_PERCENT: u8 = 2;
pub const TRACK_END_PERCENT: u8 = 80;
pub const TICK: Duration = Duration::from_millis(20);
pub const ARRIVAL_PAUSE: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DemoView {
    #[default]
    Placeholder,
    Diagram,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Cookie,
    Arrived,
}

impl Marker {
    pub fn glyph(self) -> &'static str {
        match self {
            Marker::Cookie => "🍪",
            Marker::Arrived => "✅",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerFrame {
    pub position: u8,
    pub marker: Marker,
}

/// The diagram toggle and the cookie-travel animation.
#[derive(Default)]
pub struct DemoVisualizer {
    view: DemoView,
    frame: Option<MarkerFrame>,
    timer: Option<TaskId>,
}

impl DemoVisualizer {
    pub fn view(&self) -> DemoView {
        self.view
    }

    pub fn is_active(&self) -> bool {
        self.view == DemoView::Diagram
    }

    /// `None` until the animation has been played once.
    pub fn frame(&self) -> Option<MarkerFrame> {
        self.frame
    }

    pub fn start(&mut self) -> Notice {
        self.view = DemoView::Diagram;
        Notice::info(
            "Demo avviata! Osserva come il tracker riconosce lo stesso utente tra siti diversi.",
        )
    }

    pub fn reset(&mut self) {
        self.view = DemoView::Placeholder;
    }

    pub fn play(&mut self, scheduler: &mut dyn Scheduler<SiteEvent>) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.frame = Some(MarkerFrame {
            position: 0,
            marker: Marker::Cookie,
        });
        self.timer = Some(scheduler.schedule(TICK, SiteEvent::DemoTick));
    }

    pub fn tick(&mut self, scheduler: &mut dyn Scheduler<SiteEvent>) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        if frame.marker != Marker::Cookie {
            return;
        }
        frame.position = (frame.position + STEP_PERCENT).min(TRACK_END_PERCENT);
        let event = if frame.position >= TRACK_END_PERCENT {
            frame.marker = Marker::Arrived;
            scheduler.schedule(ARRIVAL_PAUSE, SiteEvent::DemoRewind)
        } else {
            scheduler.schedule(TICK, SiteEvent::DemoTick)
        };
        self.timer = Some(event);
    }

    pub fn rewind(&mut self) {
        self.timer = None;
        if let Some(frame) = self.frame.as_mut() {
            frame.position = 0;
            frame.marker = Marker::Cookie;
        }
    }
}
