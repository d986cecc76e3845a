//! Scenario tests for the render scheduler.
//!
//! Time is simulated by offsetting a base `Instant`; no test sleeps.


use std::time::Duration;

use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_time::Instant;

use super::scheduler::{InitOutcome, RenderRequest, RenderScheduler};
use super::testing::{FakeFactory, FakeView};
use crate::layout::Viewport;
use crate::model::PhotoRecord;

pub(super) const DESKTOP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

pub(super) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub(super) fn photos(n: usize) -> Vec<PhotoRecord> {
    (0..n)
        .map(|i| {
            PhotoRecord::new(
                format!("https://img/{i}.jpg"),
                format!("p{i}"),
                Utc.with_ymd_and_hms(2024, 6, 1, 8, i as u32, 0).unwrap(),
            )
        })
        .collect()
}

pub(super) fn scheduler() -> RenderScheduler<FakeFactory, FakeView> {
    RenderScheduler::with_random(
        FakeFactory::default(),
        FakeView::default(),
        Box::new(StdRng::seed_from_u64(9)),
    )
}

/// Render at `t0`, let the widget start and resize handling arm.
/// Returns the instant resize handling was armed.
pub(super) fn render_and_arm(
    scheduler: &mut RenderScheduler<FakeFactory, FakeView>,
    t0: Instant,
    album: &[PhotoRecord],
    viewport: Viewport,
) -> Instant {
    assert_eq!(
        scheduler.request_render(t0, album, viewport),
        RenderRequest::Scheduled
    );
    let started = t0 + ms(150);
    let outcome = scheduler.tick(started, album, viewport);
    assert!(matches!(outcome.init, Some(InitOutcome::Ready { .. })));

    let armed_at = started + ms(2000);
    assert!(scheduler.tick(armed_at, album, viewport).armed);
    armed_at
}
