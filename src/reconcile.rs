use log::{debug, warn};

use crate::board::{Board, Figure, PieceKind, SideColor};
use crate::error::ScoutError;
use crate::observe::{ObservationExtractor, PieceObservation};
use crate::page::PageDriver;

/// Selector for the board container when playing against a site bot.
pub const BOT_BOARD_SELECTOR: &str = r#"//*[@id="board-play-computer"]/div"#;
/// Selector for the board container in player-vs-player games.
pub const PVP_BOARD_SELECTOR: &str = r#"//*[@id="board-single"]/div"#;

/// One player entity. Figures of its color on the grid form its collection;
/// the side itself only carries identity and playing strength.
#[derive(Clone, Debug, PartialEq)]
pub struct Side {
    pub color: SideColor,
    pub label: String,
    pub strength: f32,
}

/// Builds the two sides of a board model. Pluggable so the oracle's own
/// side-construction policy can be injected; the reconciler never hardcodes
/// strength.
pub trait SideFactory {
    fn build(&self, color: SideColor) -> Side;
}

/// Full-strength sides with the conventional labels.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSideFactory;

impl SideFactory for DefaultSideFactory {
    fn build(&self, color: SideColor) -> Side {
        Side {
            color,
            label: color.label().to_string(),
            strength: 1.0,
        }
    }
}

/// The reconciled state of one scrape cycle: the grid plus its two sides.
/// Never shared across cycles; the next scrape rebuilds it from scratch.
#[derive(Clone, Debug)]
pub struct BoardModel {
    pub board: Board,
    pub light: Side,
    pub dark: Side,
}

impl BoardModel {
    pub fn side(&self, color: SideColor) -> &Side {
        match color {
            SideColor::Light => &self.light,
            SideColor::Dark => &self.dark,
        }
    }
}

/// Builds a board model from a set of observations. Later observations win
/// on duplicate squares. Zero placed figures is `BoardNotFound`.
pub fn reconcile<F: SideFactory>(
    observations: &[PieceObservation],
    sides: &F,
) -> Result<BoardModel, ScoutError> {
    let mut board = Board::new();
    for obs in observations {
        let sq = obs.square.to_model();
        if let Some(prev) = board.place(sq, Figure::new(obs.color, obs.kind)) {
            debug!("square {:?} observed twice, replacing {:?}", sq, prev.kind);
        }
    }
    if board.is_empty() {
        return Err(ScoutError::BoardNotFound);
    }
    infer_pawn_first_moves(&mut board);
    Ok(BoardModel {
        board,
        light: sides.build(SideColor::Light),
        dark: sides.build(SideColor::Dark),
    })
}

/// Marks pawns still standing on a starting rank as first-move eligible.
/// Runs exactly once per reconciliation, after all placement: the test is
/// only meaningful against the final layout. Position-only on purpose, so
/// it holds no matter which side the page renders at the bottom.
fn infer_pawn_first_moves(board: &mut Board) {
    board.for_each_mut(|sq, figure| {
        if figure.kind == PieceKind::Pawn {
            figure.first_move = sq.row == 1 || sq.row == 6;
        }
    });
}

/// Which page layout a scrape should assume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrapeStrategy {
    /// Fixed bot-game layout; the bottom of the page is always White.
    VsBot,
    /// Player-vs-player layout; orientation must be resolved separately.
    VsPlayer,
    /// Try the stricter PvP layout first, fall back to the bot layout on a
    /// transient page error or a missing board.
    Universal,
}

impl ScrapeStrategy {
    fn selector(self) -> &'static str {
        match self {
            ScrapeStrategy::VsBot => BOT_BOARD_SELECTOR,
            // Universal starts from the PvP selector.
            _ => PVP_BOARD_SELECTOR,
        }
    }
}

/// Scrapes the current page and reconciles it into a board model.
pub fn scrape_board<D: PageDriver, F: SideFactory>(
    driver: &D,
    strategy: ScrapeStrategy,
    sides: &F,
) -> Result<BoardModel, ScoutError> {
    let extractor = ObservationExtractor::new();
    let first = extractor
        .extract(driver, strategy.selector())
        .and_then(|obs| reconcile(&obs, sides));
    match (strategy, first) {
        (ScrapeStrategy::Universal, Err(err)) => {
            warn!("pvp layout scrape failed ({}), falling back to bot layout", err);
            let obs = extractor.extract(driver, BOT_BOARD_SELECTOR)?;
            reconcile(&obs, sides)
        }
        (_, result) => result,
    }
}
