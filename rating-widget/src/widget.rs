use crate::domain::{History, RatingRecord, UserName};
use crate::error::{FetchError, WidgetError};
use crate::host::{ElementKind, Host, ResizeListener};
use crate::layout::{Layout, Viewport};
use crate::source::HistorySource;
use crate::tier::RatingTiers;

pub const WIDGET_NAME: &str = "AtCoder Widget";
pub const WIDGET_URL: &str = "https://github.com/rdrgn/atcoder-widget";
const PROFILE_URL: &str = "https://atcoder.jp/users";

const CONTAINER_STYLE: &str = "position:relative;width:100%;height:100%;\
                               background-color:#ffffff;color:#9e9e9e;font-size:10px;";
const HEADER_MARGIN: u32 = 10;
const BAND_OPACITY: &str = "0.2";
const LINE_COLOR: &str = "#9e9e9e";
const LINE_STROKE_WIDTH: &str = "2";
const MARKER_RADIUS: &str = "4";
const MARKER_STROKE_COLOR: &str = "#ffffff";
const MARKER_STROKE_WIDTH: &str = "1";

/// Where a widget is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    Uninitialized,
    Loading,
    Available,
    Invalid,
    Disposed,
}

/// The one fetch a widget asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRequest {
    pub user: UserName,
}

/// Elements created at construction, before any data is known.
struct Chrome<E> {
    container: E,
    header: E,
    /// Bold user name shown until the history arrives.
    header_name: E,
    svg: E,
}

/// Shapes drawn from a history, index-aligned with the layout they came from.
struct RenderHandles<E> {
    bands: Vec<E>,
    lines: Vec<E>,
    markers: Vec<E>,
}

enum Phase<E> {
    Uninitialized,
    Loading {
        request: Option<HistoryRequest>,
    },
    Available {
        history: History,
        handles: RenderHandles<E>,
    },
    Invalid,
    Disposed,
}

/// Draws one user's rating history into a host element and keeps it laid
/// out as the element is resized.
pub struct Widget<H: Host> {
    root: Option<H::Element>,
    user: Option<UserName>,
    tiers: RatingTiers,
    viewport: Viewport,
    chrome: Option<Chrome<H::Element>>,
    listener: Option<ResizeListener>,
    phase: Phase<H::Element>,
}

impl<H: Host> Widget<H> {
    /// Validates the inputs and prepares the container. An invalid root or
    /// user name is logged and leaves an inert widget that owns nothing.
    /// The fetch is not started here: the embedder drives it with [`load`],
    /// or with [`take_request`] followed by [`on_history_loaded`].
    ///
    /// [`load`]: Self::load
    /// [`take_request`]: Self::take_request
    /// [`on_history_loaded`]: Self::on_history_loaded
    pub fn new(host: &mut H, root: Option<H::Element>, user: &str) -> Self {
        Self::with_tiers(host, root, user, RatingTiers::ATCODER)
    }

    /// Like [`Widget::new`], coloring the chart with `tiers`.
    pub fn with_tiers(
        host: &mut H,
        root: Option<H::Element>,
        user: &str,
        tiers: RatingTiers,
    ) -> Self {
        let mut widget = Self {
            root: None,
            user: None,
            tiers,
            viewport: Viewport::new(0.0, 0.0),
            chrome: None,
            listener: None,
            phase: Phase::Uninitialized,
        };
        let validated = root
            .ok_or(WidgetError::InvalidRoot)
            .and_then(|root| {
                let user = UserName::parse(user.to_string()).map_err(WidgetError::InvalidUser)?;
                Ok((root, user))
            });
        let (root, user) = match validated {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, "{}: refusing to start", WIDGET_NAME);
                widget.phase = Phase::Invalid;
                return widget;
            }
        };

        let (width, height) = host.client_size(&root);
        widget.viewport = Viewport::new(width, height);
        widget.chrome = Some(build_chrome(host, &root, &user));
        widget.listener = Some(host.add_resize_listener());
        widget.phase = Phase::Loading {
            request: Some(HistoryRequest { user: user.clone() }),
        };
        tracing::info!(user = %user, "{}: waiting for rating history", WIDGET_NAME);
        widget.root = Some(root);
        widget.user = Some(user);
        widget
    }

    pub fn state(&self) -> WidgetState {
        match self.phase {
            Phase::Uninitialized => WidgetState::Uninitialized,
            Phase::Loading { .. } => WidgetState::Loading,
            Phase::Available { .. } => WidgetState::Available,
            Phase::Invalid => WidgetState::Invalid,
            Phase::Disposed => WidgetState::Disposed,
        }
    }

    pub fn user(&self) -> Option<&UserName> {
        self.user.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The resize subscription held by this widget, if any.
    pub fn resize_listener(&self) -> Option<ResizeListener> {
        self.listener
    }

    /// The loaded history, once the chart is drawn.
    pub fn history(&self) -> Option<&History> {
        match &self.phase {
            Phase::Available { history, .. } => Some(history),
            _ => None,
        }
    }

    /// Hands out the pending history request. Only the first call while
    /// loading gets one, so the fetch happens at most once.
    pub fn take_request(&mut self) -> Option<HistoryRequest> {
        match &mut self.phase {
            Phase::Loading { request } => request.take(),
            _ => None,
        }
    }

    /// Fetches the history from `source` and draws it.
    pub async fn load<S: HistorySource>(&mut self, host: &mut H, source: &S) {
        let Some(request) = self.take_request() else {
            tracing::debug!(state = ?self.state(), "No history request pending");
            return;
        };
        let outcome = source.fetch_history(&request.user).await;
        self.on_history_loaded(host, outcome);
    }

    /// Completion of the history fetch. Outcomes arriving after the widget
    /// left the loading state, e.g. because it was disposed, are dropped.
    pub fn on_history_loaded(
        &mut self,
        host: &mut H,
        outcome: Result<Vec<RatingRecord>, FetchError>,
    ) {
        if !matches!(self.phase, Phase::Loading { .. }) {
            tracing::debug!(state = ?self.state(), "Ignoring a late rating history");
            return;
        }
        let records = outcome.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "{}: no rating history received", WIDGET_NAME);
            vec![]
        });
        let history = match History::from_records(records) {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(error = %e, "{}: nothing to draw", WIDGET_NAME);
                self.phase = Phase::Invalid;
                return;
            }
        };
        let (Some(chrome), Some(user)) = (&self.chrome, &self.user) else {
            self.phase = Phase::Invalid;
            return;
        };

        let layout = Layout::compute(&history, &self.tiers, self.viewport);
        write_header(
            host,
            &chrome.header,
            &chrome.header_name,
            user,
            &history,
            &self.tiers,
        );
        let handles = draw(
            host,
            &chrome.svg,
            &layout,
            &history,
            &self.tiers,
            self.viewport,
        );
        tracing::info!(
            user = %user,
            contests = history.len(),
            "{}: chart drawn",
            WIDGET_NAME
        );
        self.phase = Phase::Available { history, handles };
    }

    /// Re-lays out the chart for the root's current size. Does nothing
    /// until the chart is drawn.
    pub fn on_resize(&mut self, host: &mut H) {
        let Phase::Available { history, handles } = &self.phase else {
            return;
        };
        let Some(root) = &self.root else {
            return;
        };
        let (width, height) = host.client_size(root);
        self.viewport = Viewport::new(width, height);
        let layout = Layout::compute(history, &self.tiers, self.viewport);
        update(host, handles, &layout, self.viewport);
        tracing::debug!(width, height, "Chart laid out again");
    }

    /// Removes everything the widget added to the root and stops listening
    /// for resizes. Safe to call in any state, any number of times.
    pub fn dispose(&mut self, host: &mut H) {
        if let (Some(root), Some(chrome)) = (self.root.take(), self.chrome.take()) {
            host.remove_child(&root, &chrome.container);
        }
        if let Some(listener) = self.listener.take() {
            host.remove_resize_listener(listener);
        }
        if !matches!(self.phase, Phase::Disposed) {
            tracing::debug!(state = ?self.state(), "Widget disposed");
        }
        self.phase = Phase::Disposed;
    }
}

fn build_chrome<H: Host>(host: &mut H, root: &H::Element, user: &UserName) -> Chrome<H::Element> {
    let container = host.create_element(ElementKind::Div);
    host.set_attribute(&container, "style", CONTAINER_STYLE);
    host.append_child(root, &container);

    let header = host.create_element(ElementKind::Div);
    host.set_attribute(
        &header,
        "style",
        &format!("position:absolute;top:{HEADER_MARGIN}px;left:{HEADER_MARGIN}px;"),
    );
    let name = host.create_element(ElementKind::Span);
    host.set_attribute(&name, "style", "font-weight:bold;");
    host.set_text(&name, user.as_ref());
    host.append_child(&header, &name);
    host.append_child(&container, &header);

    let footer = host.create_element(ElementKind::Div);
    host.set_attribute(
        &footer,
        "style",
        &format!("position:absolute;top:{HEADER_MARGIN}px;right:{HEADER_MARGIN}px;"),
    );
    let link = host.create_element(ElementKind::Anchor);
    host.set_attribute(&link, "href", WIDGET_URL);
    host.set_attribute(&link, "style", "color:inherit;text-decoration:none;");
    host.set_text(&link, WIDGET_NAME);
    host.append_child(&footer, &link);
    host.append_child(&container, &footer);

    let svg = host.create_element(ElementKind::Svg);
    host.set_attribute(&svg, "version", "1.1");
    host.set_attribute(&svg, "xmlns", "http://www.w3.org/2000/svg");
    host.set_attribute(&svg, "xmlns:xlink", "http://www.w3.org/1999/xlink");
    host.set_attribute(&svg, "style", "width:100%;height:100%;");
    host.append_child(&container, &svg);

    Chrome {
        container,
        header,
        header_name: name,
        svg,
    }
}

/// Replaces the header with the user's profile link and rating summary.
fn write_header<H: Host>(
    host: &mut H,
    header: &H::Element,
    placeholder: &H::Element,
    user: &UserName,
    history: &History,
    tiers: &RatingTiers,
) {
    let current = history.current_rating();
    let highest = history.highest_rating();
    let current_color = tiers.color_of(f64::from(current));
    let highest_color = tiers.color_of(f64::from(highest));

    host.remove_child(header, placeholder);
    let link = host.create_element(ElementKind::Anchor);
    host.set_attribute(&link, "href", &format!("{}/{}", PROFILE_URL, user));
    host.set_attribute(
        &link,
        "style",
        &format!("color:{current_color};text-decoration:none;font-weight:bold;"),
    );
    host.set_text(&link, user.as_ref());
    host.append_child(header, &link);

    for (label, value, color) in [
        (" Current ", current, current_color),
        (" Highest ", highest, highest_color),
    ] {
        let caption = host.create_element(ElementKind::Span);
        host.set_text(&caption, label);
        host.append_child(header, &caption);
        let figure = host.create_element(ElementKind::Span);
        host.set_attribute(&figure, "style", &format!("color:{color};"));
        host.set_text(&figure, &value.to_string());
        host.append_child(header, &figure);
    }
}

fn draw<H: Host>(
    host: &mut H,
    svg: &H::Element,
    layout: &Layout,
    history: &History,
    tiers: &RatingTiers,
    viewport: Viewport,
) -> RenderHandles<H::Element> {
    let mut bands = Vec::with_capacity(layout.threshold_ys().len() - 1);
    for band in layout.bands() {
        let rect = host.create_element(ElementKind::Rect);
        host.set_attribute(&rect, "x", "0");
        host.set_attribute(&rect, "fill", tiers.color(band.tier));
        host.set_attribute(&rect, "fill-opacity", BAND_OPACITY);
        host.append_child(svg, &rect);
        bands.push(rect);
    }

    let mut lines = Vec::with_capacity(history.len() - 1);
    for _ in layout.segments() {
        let line = host.create_element(ElementKind::Line);
        host.set_attribute(&line, "stroke-width", LINE_STROKE_WIDTH);
        host.set_attribute(&line, "stroke", LINE_COLOR);
        host.append_child(svg, &line);
        lines.push(line);
    }

    let mut markers = Vec::with_capacity(history.len());
    for record in history.records() {
        let circle = host.create_element(ElementKind::Circle);
        host.set_attribute(&circle, "r", MARKER_RADIUS);
        host.set_attribute(&circle, "stroke-width", MARKER_STROKE_WIDTH);
        host.set_attribute(&circle, "stroke", MARKER_STROKE_COLOR);
        host.set_attribute(&circle, "fill", tiers.color_of(f64::from(record.new_rating)));
        host.append_child(svg, &circle);
        markers.push(circle);
    }

    let handles = RenderHandles {
        bands,
        lines,
        markers,
    };
    update(host, &handles, layout, viewport);
    handles
}

/// Moves existing shapes to the positions in `layout`.
fn update<H: Host>(
    host: &mut H,
    handles: &RenderHandles<H::Element>,
    layout: &Layout,
    viewport: Viewport,
) {
    let width = viewport.width().to_string();
    for (rect, band) in handles.bands.iter().zip(layout.bands()) {
        host.set_attribute(rect, "y", &band.y.to_string());
        host.set_attribute(rect, "width", &width);
        host.set_attribute(rect, "height", &band.height.to_string());
    }
    for (line, (from, to)) in handles.lines.iter().zip(layout.segments()) {
        host.set_attribute(line, "x1", &from.x.to_string());
        host.set_attribute(line, "y1", &from.y.to_string());
        host.set_attribute(line, "x2", &to.x.to_string());
        host.set_attribute(line, "y2", &to.y.to_string());
    }
    for (circle, point) in handles.markers.iter().zip(layout.points()) {
        host.set_attribute(circle, "cx", &point.x.to_string());
        host.set_attribute(circle, "cy", &point.y.to_string());
    }
}
