//! Paginated feed backed by canned JSON pages.
//!
//! The pages mimic a sloppy backend: ids arrive as numbers or strings, some
//! fields are `null` or missing, and each page repeats the last item of the
//! previous one.

use anyhow::Context;
use dqtool_decoding::{DefaultEmptyString, DefaultFalse, LenientInt, LenientString};
use dqtool_foundation::{Point, RefreshController, RefreshState, ScrollView, Size};
use dqtool_support::{
    contains_match, format_date, parse_date, ContainsAll, DedupExt, DEFAULT_DATE_FORMAT,
};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const ROW_HEIGHT: f32 = 120.0;

/// Upper bound on simulated scroll steps, in case a page never arrives.
const MAX_SCROLL_STEPS: usize = 200;

const PAGES: [&str; 3] = [
    r#"[
        {"id": 1, "title": "Release notes", "posted": "02/02/2023 09:15", "pinned": true},
        {"id": "2", "title": "Roadmap", "posted": "03/02/2023 11:00"},
        {"id": 3, "title": null, "posted": "03/02/2023 18:40"},
        {"id": 4.0, "title": "Hiring", "posted": "05/02/2023 08:05", "pinned": null},
        {"id": "5", "title": "Release candidate", "posted": "06/02/2023 16:30"}
    ]"#,
    r#"[
        {"id": 5, "title": "Release candidate", "posted": "06/02/2023 16:30"},
        {"id": 6, "title": "Office move", "posted": "07/02/2023 10:00"},
        {"id": 7, "title": "Quarterly review", "posted": 20230208},
        {"id": "8", "title": "Bug bash", "posted": "09/02/2023 14:00"},
        {"id": 9, "posted": "10/02/2023 12:00"}
    ]"#,
    r#"[
        {"id": 9, "posted": "10/02/2023 12:00"},
        {"id": 10, "title": "Final release", "posted": "12/02/2023 09:00", "pinned": true},
        {"id": 11, "title": "Retro", "posted": "13/02/2023 15:45"},
        {"id": "12", "title": "Thank you", "posted": "14/02/2023 17:20"}
    ]"#,
];

#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub id: LenientInt,
    pub title: DefaultEmptyString,
    pub posted: LenientString,
    pub pinned: DefaultFalse,
}

#[derive(Default)]
struct FeedData {
    items: RefCell<Vec<FeedItem>>,
    next_page: Cell<usize>,
}

impl FeedData {
    fn reset(&self) {
        self.items.borrow_mut().clear();
        self.next_page.set(0);
    }

    /// Appends the next page and resizes the view to fit. Returns the state
    /// the controller should move to.
    fn load_next(&self, view: &ScrollView) -> anyhow::Result<RefreshState> {
        let page = self.next_page.get();
        let Some(json) = PAGES.get(page) else {
            return Ok(RefreshState::NoMoreData);
        };
        let fetched: Vec<FeedItem> =
            serde_json::from_str(json).with_context(|| format!("page {page} is malformed"))?;

        let mut items = self.items.borrow_mut();
        items.extend(fetched);
        let unique = items.filter_duplicates_by(|kept, candidate| kept.id == candidate.id);
        *items = unique;
        self.next_page.set(page + 1);

        let width = view.viewport_size().width;
        view.set_content_size(Size::new(width, items.len() as f32 * ROW_HEIGHT));
        log::info!("page {page} loaded, {} items in feed", items.len());

        if page + 1 >= PAGES.len() {
            Ok(RefreshState::NoMoreData)
        } else {
            Ok(RefreshState::Idle)
        }
    }
}

pub struct Feed {
    view: ScrollView,
    data: Rc<FeedData>,
}

impl Feed {
    pub fn new(viewport: Size) -> anyhow::Result<Self> {
        let view = ScrollView::new(viewport);
        let data = Rc::new(FeedData::default());
        data.load_next(&view)?;

        let controller = RefreshController::new();
        {
            let data = data.clone();
            let weak = view.downgrade();
            controller.set_refresh_handler(move || {
                let Some(view) = weak.upgrade() else {
                    return;
                };
                data.reset();
                let result = data.load_next(&view);
                view.end_refreshing(result.is_ok());
                match result {
                    Ok(RefreshState::NoMoreData) => {
                        view.set_refresh_state(RefreshState::NoMoreData)
                    }
                    Ok(_) => {}
                    Err(err) => log::error!("refresh failed: {err:#}"),
                }
                view.scroll_to_top();
            });
        }
        {
            let data = data.clone();
            let weak = view.downgrade();
            controller.set_load_more_handler(move || {
                let Some(view) = weak.upgrade() else {
                    return;
                };
                let state = data.load_next(&view).unwrap_or_else(|err| {
                    log::error!("load-more failed: {err:#}");
                    RefreshState::Idle
                });
                view.set_refresh_state(state);
            });
        }
        controller.attach(&view);

        Ok(Self { view, data })
    }

    pub fn view(&self) -> &ScrollView {
        &self.view
    }

    pub fn item_count(&self) -> usize {
        self.data.items.borrow().len()
    }

    pub fn items(&self) -> Vec<FeedItem> {
        self.data.items.borrow().clone()
    }

    /// Scrolls down by `delta`, stopping at the end of the content.
    /// Returns `false` once the offset no longer moves.
    pub fn scroll_by(&self, delta: f32) -> bool {
        let current = self.view.content_offset().y;
        let target = (current + delta).min(self.view.max_scroll_extent().max(0.0));
        self.view.set_content_offset(Point::new(0.0, target));
        target > current
    }

    pub fn pull_to_refresh(&self) {
        if let Some(controller) = self.view.refresh_controller() {
            controller.trigger_manual_refresh();
        }
    }
}

/// Scrolls through every page, then pulls to refresh.
pub fn run() -> anyhow::Result<()> {
    let feed = Feed::new(Size::new(360.0, 480.0))?;

    let mut steps = 0;
    while feed.view().refresh_state() != Some(RefreshState::NoMoreData) && steps < MAX_SCROLL_STEPS
    {
        if !feed.scroll_by(ROW_HEIGHT / 2.0) {
            break;
        }
        steps += 1;
    }
    log::info!(
        "reached {:?} after {steps} scroll steps, {} items",
        feed.view().refresh_state(),
        feed.item_count()
    );

    let items = feed.items();
    for item in &items {
        let posted = parse_date(&item.posted, DEFAULT_DATE_FORMAT)
            .and_then(|date| format_date(&date, "%a %-d %b %Y"))
            .unwrap_or_else(|| format!("unparsed {:?}", item.posted.as_str()));
        let pin = if *item.pinned { " [pinned]" } else { "" };
        log::info!("#{:<3} {:<20} {posted}{pin}", *item.id, item.title.as_str());
    }

    let releases: Vec<i64> = items
        .iter()
        .filter(|item| contains_match(&item.title, " release "))
        .map(|item| *item.id)
        .collect();
    log::info!("posts mentioning a release: {releases:?}");
    let ids: Vec<i64> = items.iter().map(|item| *item.id).collect();
    log::info!("pinned posts present: {}", ids.contains_all(&[1, 10]));

    feed.pull_to_refresh();
    log::info!(
        "after refresh: {:?}, {} items, offset {:?}",
        feed.view().refresh_state(),
        feed.item_count(),
        feed.view().content_offset()
    );
    Ok(())
}
