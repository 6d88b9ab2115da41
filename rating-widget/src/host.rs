/// Elements the widget knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Div,
    Span,
    Anchor,
    Svg,
    Rect,
    Line,
    Circle,
}

impl ElementKind {
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Anchor => "a",
            Self::Svg => "svg",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Circle => "circle",
        }
    }

    /// Whether the element lives in the SVG namespace.
    pub fn is_svg(self) -> bool {
        matches!(self, Self::Svg | Self::Rect | Self::Line | Self::Circle)
    }
}

/// Token for one subscription to the host's viewport-resize notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResizeListener(pub u64);

/// What the widget needs from the page that embeds it. The host is passed
/// by `&mut` into every widget entry point, so notifications can never
/// re-enter the widget while it is mutating elements.
pub trait Host {
    type Element: Clone;

    /// Current inner width and height of `element`, in pixels.
    fn client_size(&self, element: &Self::Element) -> (f64, f64);
    fn create_element(&mut self, kind: ElementKind) -> Self::Element;
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);
    fn remove_child(&mut self, parent: &Self::Element, child: &Self::Element);
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);
    /// Replaces the text content of `element`.
    fn set_text(&mut self, element: &Self::Element, text: &str);
    fn add_resize_listener(&mut self) -> ResizeListener;
    fn remove_resize_listener(&mut self, listener: ResizeListener);
}
