use chrono::{DateTime, TimeDelta};
use once_cell::sync::Lazy;
use rating_widget::document::{Document, NodeId};
use rating_widget::domain::{RatingRecord, UserName};
use rating_widget::error::FetchError;
use rating_widget::host::ElementKind;
use rating_widget::source::HistorySource;
use rating_widget::telemetry::{get_subscriber, init_subscriber};
use rating_widget::Widget;
use std::cell::Cell;
use std::future::Future;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to install the test subscriber");
    } else {
        let subscriber = get_subscriber(default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to install the test subscriber");
    };
});

/// A rated contest ending `day` days after the first one.
pub fn record(day: i64, old_rating: i32, new_rating: i32) -> RatingRecord {
    let first = DateTime::parse_from_rfc3339("2020-01-04T22:40:00+09:00").unwrap();
    RatingRecord {
        is_rated: true,
        place: 321,
        old_rating,
        new_rating,
        performance: new_rating,
        inner_performance: new_rating,
        contest_id: format!("arc{:03}", 100 + day),
        contest_name: format!("AtCoder Regular Contest {}", 100 + day),
        end_time: first + TimeDelta::days(day),
    }
}

pub fn unrated(day: i64) -> RatingRecord {
    RatingRecord {
        is_rated: false,
        ..record(day, 0, 0)
    }
}

/// Serves a canned history, or a 503 when there is none.
pub struct StubSource {
    records: Option<Vec<RatingRecord>>,
    calls: Cell<usize>,
}

impl StubSource {
    pub fn serving(records: Vec<RatingRecord>) -> Self {
        Self {
            records: Some(records),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            records: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl HistorySource for StubSource {
    fn fetch_history(
        &self,
        _user: &UserName,
    ) -> impl Future<Output = Result<Vec<RatingRecord>, FetchError>> {
        self.calls.set(self.calls.get() + 1);
        let outcome = self.records.clone().ok_or(FetchError::Status(503));
        async move { outcome }
    }
}

/// A widget embedded in its own document.
pub struct TestPage {
    pub document: Document,
    pub root: NodeId,
    pub widget: Widget<Document>,
}

impl TestPage {
    pub fn open(user: &str, width: f64, height: f64) -> Self {
        Lazy::force(&TRACING);

        let mut document = Document::new();
        let root = document.create_root(width, height);
        let widget = Widget::new(&mut document, Some(root), user);
        Self {
            document,
            root,
            widget,
        }
    }

    pub async fn load(&mut self, source: &impl HistorySource) {
        self.widget.load(&mut self.document, source).await;
    }

    pub fn deliver(&mut self, records: Vec<RatingRecord>) {
        self.widget.on_history_loaded(&mut self.document, Ok(records));
    }

    /// Changes the root's size and notifies every resize listener that
    /// belongs to the widget.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.document.set_client_size(self.root, width, height);
        let listeners: Vec<_> = self.document.resize_listeners().collect();
        for listener in listeners {
            if self.widget.resize_listener() == Some(listener) {
                self.widget.on_resize(&mut self.document);
            }
        }
    }

    pub fn dispose(&mut self) {
        self.widget.dispose(&mut self.document);
    }

    pub fn shapes(&self, kind: ElementKind) -> Vec<NodeId> {
        self.document.descendants_of_kind(self.root, kind)
    }

    pub fn shape_count(&self) -> usize {
        [ElementKind::Rect, ElementKind::Line, ElementKind::Circle]
            .into_iter()
            .map(|kind| self.shapes(kind).len())
            .sum()
    }

    pub fn number(&self, id: NodeId, attribute: &str) -> f64 {
        self.document
            .attribute(id, attribute)
            .expect("Missing attribute")
            .parse()
            .expect("Attribute is not a number")
    }

    pub fn markup(&self) -> String {
        self.document.render(self.root)
    }
}
