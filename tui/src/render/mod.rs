use ratatui::layout::Rect;

pub mod renderable;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Insets {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

impl Insets {
    pub const fn tlbr(top: u16, left: u16, bottom: u16, right: u16) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn vh(vertical: u16, horizontal: u16) -> Self {
        Self::tlbr(vertical, horizontal, vertical, horizontal)
    }

    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

pub trait RectExt {
    /// Shrink the rect by `insets`, never underflowing.
    fn inset(&self, insets: Insets) -> Rect;

    /// A `width` x `height` rect centered inside `self`, clamped to fit.
    fn centered(&self, width: u16, height: u16) -> Rect;
}

impl RectExt for Rect {
    fn inset(&self, insets: Insets) -> Rect {
        let x = self.x.saturating_add(insets.left.min(self.width));
        let y = self.y.saturating_add(insets.top.min(self.height));
        let width = self.width.saturating_sub(insets.horizontal());
        let height = self.height.saturating_sub(insets.vertical());
        Rect::new(x, y, width, height)
    }

    fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}
