pub mod card;
pub mod confirm;
pub mod form;
pub mod money;
pub mod table;
pub mod tabs;
pub mod toast;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A `width` x `height` rectangle centred in `area`, clamped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 6);
        let rect = centered(area, 40, 4);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 1);
    }
}
