use log::debug;
use regex::Regex;

use crate::board::{PieceKind, SideColor};
use crate::coords::PageSquare;
use crate::error::ScoutError;
use crate::page::{PageDriver, PageElement};

/// One scraped piece, still in page coordinates. Ephemeral: discarded as
/// soon as reconciliation has consumed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceObservation {
    pub color: SideColor,
    pub kind: PieceKind,
    pub square: PageSquare,
}

/// Matches the page's piece element grammar and turns matching elements
/// into observations. Non-matching elements are board decorations and are
/// skipped silently.
pub struct ObservationExtractor {
    pattern: Regex,
}

impl Default for ObservationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationExtractor {
    pub fn new() -> Self {
        // Anchored at the start only; the page appends extra classes after
        // the square marker.
        let pattern =
            Regex::new(r"^piece (?P<color>[wb])(?P<kind>[a-z]) square-(?P<column>\d)(?P<row>\d)")
                .expect("piece grammar regex is valid");
        Self { pattern }
    }

    /// Parses one element class string. Pure; no page handle involved.
    pub fn parse_class(&self, class: &str) -> Option<PieceObservation> {
        let caps = self.pattern.captures(class)?;
        let color = match &caps["color"] {
            "w" => SideColor::Light,
            _ => SideColor::Dark,
        };
        let kind = PieceKind::from_letter(caps["kind"].chars().next()?);
        let column: u8 = caps["column"].parse().ok()?;
        let row: u8 = caps["row"].parse().ok()?;
        if !(1..=8).contains(&column) || !(1..=8).contains(&row) {
            return None;
        }
        Some(PieceObservation {
            color,
            kind,
            square: PageSquare::new(column, row),
        })
    }

    /// Scrapes every element under `selector` and keeps the ones that carry
    /// the piece grammar. Zero matches means the board itself was not found
    /// on the page.
    pub fn extract<D: PageDriver>(
        &self,
        driver: &D,
        selector: &str,
    ) -> Result<Vec<PieceObservation>, ScoutError> {
        let elements = driver.find_elements(selector)?;
        let mut observations = Vec::new();
        for element in &elements {
            if let Some(class) = element.class_name()? {
                if let Some(obs) = self.parse_class(&class) {
                    observations.push(obs);
                }
            }
        }
        if observations.is_empty() {
            debug!(
                "no piece elements among {} candidates under {}",
                elements.len(),
                selector
            );
            return Err(ScoutError::BoardNotFound);
        }
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_class() {
        let extractor = ObservationExtractor::new();
        let obs = extractor.parse_class("piece wq square-45").unwrap();
        assert_eq!(obs.color, SideColor::Light);
        assert_eq!(obs.kind, PieceKind::Queen);
        assert_eq!(obs.square, PageSquare::new(4, 5));
    }

    #[test]
    fn test_parse_dark_piece_with_trailing_classes() {
        let extractor = ObservationExtractor::new();
        let obs = extractor.parse_class("piece bn square-27 dragging").unwrap();
        assert_eq!(obs.color, SideColor::Dark);
        assert_eq!(obs.kind, PieceKind::Knight);
        assert_eq!(obs.square, PageSquare::new(2, 7));
    }

    #[test]
    fn test_unknown_letter_maps_to_generic() {
        let extractor = ObservationExtractor::new();
        let obs = extractor.parse_class("piece wz square-11").unwrap();
        assert_eq!(obs.kind, PieceKind::Generic);
    }

    #[test]
    fn test_decorations_are_skipped() {
        let extractor = ObservationExtractor::new();
        assert_eq!(extractor.parse_class("highlight square-44"), None);
        assert_eq!(extractor.parse_class("hint square-33"), None);
        assert_eq!(extractor.parse_class("coordinates"), None);
        assert_eq!(extractor.parse_class(""), None);
    }

    #[test]
    fn test_out_of_range_square_is_rejected() {
        let extractor = ObservationExtractor::new();
        assert_eq!(extractor.parse_class("piece wp square-09"), None);
        assert_eq!(extractor.parse_class("piece wp square-90"), None);
    }
}
