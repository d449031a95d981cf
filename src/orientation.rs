use log::debug;

use crate::board::SideColor;
use crate::page::{PageDriver, PageElement};

/// Selector for the bottom player's captured-pieces widget, the only page
/// state that reveals which color is rendered at the bottom.
pub const CAPTURED_PIECES_SELECTOR: &str =
    r#"//*[@id="board-layout-player-bottom"]/div/div[2]/wc-captured-pieces"#;

/// Which logical color the page renders at the bottom of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Perspective {
    LightAtBottom,
    DarkAtBottom,
}

impl Perspective {
    /// The color owned by the bottom-of-screen player.
    pub fn bottom_color(self) -> SideColor {
        match self {
            Perspective::LightAtBottom => SideColor::Light,
            Perspective::DarkAtBottom => SideColor::Dark,
        }
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Perspective::LightAtBottom
    }
}

/// Reads the captured-pieces widget to decide the board orientation.
/// Any failure along the way degrades to light-at-bottom; orientation
/// ambiguity must never abort a scrape.
pub fn resolve_perspective<D: PageDriver>(driver: &D) -> Perspective {
    let marker = driver
        .find_element(CAPTURED_PIECES_SELECTOR)
        .and_then(|widget| widget.attribute("player-color"));
    match marker {
        Ok(Some(color)) if color == "2" => Perspective::DarkAtBottom,
        Ok(_) => Perspective::LightAtBottom,
        Err(err) => {
            debug!("perspective lookup failed ({}), assuming White at bottom", err);
            Perspective::LightAtBottom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{PageSnapshot, SnapshotDriver, SnapshotElement};

    fn widget(player_color: &str) -> SnapshotElement {
        SnapshotElement::new(CAPTURED_PIECES_SELECTOR, "")
            .with_attr("player-color", player_color)
    }

    #[test]
    fn test_dark_at_bottom_marker() {
        let driver = SnapshotDriver::new(PageSnapshot::with_elements(vec![widget("2")]));
        assert_eq!(resolve_perspective(&driver), Perspective::DarkAtBottom);
    }

    #[test]
    fn test_light_at_bottom_marker() {
        let driver = SnapshotDriver::new(PageSnapshot::with_elements(vec![widget("1")]));
        assert_eq!(resolve_perspective(&driver), Perspective::LightAtBottom);
    }

    #[test]
    fn test_missing_widget_defaults_to_light() {
        let driver = SnapshotDriver::new(PageSnapshot::default());
        assert_eq!(resolve_perspective(&driver), Perspective::LightAtBottom);
    }

    #[test]
    fn test_missing_attribute_defaults_to_light() {
        let element = SnapshotElement::new(CAPTURED_PIECES_SELECTOR, "");
        let driver = SnapshotDriver::new(PageSnapshot::with_elements(vec![element]));
        assert_eq!(resolve_perspective(&driver), Perspective::LightAtBottom);
    }
}
