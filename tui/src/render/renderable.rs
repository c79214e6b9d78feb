use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

use crate::render::Insets;
use crate::render::RectExt as _;

/// A piece of UI that knows how tall it wants to be for a given width.
pub trait Renderable {
    fn render(&self, area: Rect, buf: &mut Buffer);
    fn desired_height(&self, width: u16) -> u16;
    fn cursor_pos(&self, _area: Rect) -> Option<(u16, u16)> {
        None
    }
}

pub type RenderableItem<'a> = Box<dyn Renderable + 'a>;

impl<'a, R> From<R> for Box<dyn Renderable + 'a>
where
    R: Renderable + 'a,
{
    fn from(value: R) -> Self {
        Box::new(value)
    }
}

impl<'a> Renderable for Line<'a> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        WidgetRef::render_ref(self, area, buf);
    }
    fn desired_height(&self, _width: u16) -> u16 {
        1
    }
}

impl<'a> Renderable for Paragraph<'a> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.render_ref(area, buf);
    }
    fn desired_height(&self, width: u16) -> u16 {
        u16::try_from(self.line_count(width)).unwrap_or(u16::MAX)
    }
}

impl<R: Renderable> Renderable for Option<R> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if let Some(renderable) = self {
            renderable.render(area, buf);
        }
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.as_ref()
            .map_or(0, |renderable| renderable.desired_height(width))
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        self.as_ref().and_then(|renderable| renderable.cursor_pos(area))
    }
}

/// Children stacked top to bottom, each at its desired height.
#[derive(Default)]
pub struct ColumnRenderable<'a> {
    children: Vec<RenderableItem<'a>>,
}

impl ColumnRenderable<'_> {
    fn child_areas(&self, area: Rect) -> impl Iterator<Item = (&RenderableItem<'_>, Rect)> {
        let mut y = area.y;
        self.children.iter().map(move |child| {
            let child_area = Rect::new(area.x, y, area.width, child.desired_height(area.width))
                .intersection(area);
            y = y.saturating_add(child_area.height);
            (child, child_area)
        })
    }
}

impl Renderable for ColumnRenderable<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        for (child, child_area) in self.child_areas(area) {
            if !child_area.is_empty() {
                child.render(child_area, buf);
            }
        }
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.children
            .iter()
            .map(|child| child.desired_height(width))
            .fold(0, u16::saturating_add)
    }

    /// Cursor of the first child that reports one. At most one child is expected to.
    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        self.child_areas(area)
            .filter(|(_, child_area)| !child_area.is_empty())
            .find_map(|(child, child_area)| child.cursor_pos(child_area))
    }
}

impl<'a> ColumnRenderable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, child: impl Into<RenderableItem<'a>>) {
        self.children.push(child.into());
    }
}

pub struct InsetRenderable<'a> {
    child: RenderableItem<'a>,
    insets: Insets,
}

impl Renderable for InsetRenderable<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.child.render(area.inset(self.insets), buf);
    }
    fn desired_height(&self, width: u16) -> u16 {
        self.child
            .desired_height(width.saturating_sub(self.insets.horizontal()))
            .saturating_add(self.insets.vertical())
    }
    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        self.child.cursor_pos(area.inset(self.insets))
    }
}

pub trait RenderableExt<'a>: Sized {
    fn inset(self, insets: Insets) -> InsetRenderable<'a>;
}

impl<'a, R> RenderableExt<'a> for R
where
    R: Renderable + 'a,
{
    fn inset(self, insets: Insets) -> InsetRenderable<'a> {
        InsetRenderable {
            child: self.into(),
            insets,
        }
    }
}
