use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use crate::board::Figure;
use crate::coords::Square;
use crate::error::{PageError, ScoutError};
use crate::oracle::{MoveOracle, ScoredMove};
use crate::orientation::resolve_perspective;
use crate::page::{PageDriver, PageElement};
use crate::reconcile::SideFactory;
use crate::scout::Scout;

/// The element class the page gives a figure, in page coordinates,
/// e.g. "piece wq square-45".
pub fn figure_class(figure: &Figure, sq: Square) -> String {
    let page = sq.to_page();
    format!(
        "piece {}{} square-{}{}",
        figure.color.letter(),
        figure.kind.letter(),
        page.column,
        page.row,
    )
}

/// The class of the highlighted destination square for a quiet move.
pub fn hint_class(sq: Square) -> String {
    let page = sq.to_page();
    format!("hint square-{}{}", page.column, page.row)
}

fn class_xpath(class: &str) -> String {
    format!(r#"//*[@class="{}"]"#, class)
}

/// Plays moves on the live page through a [`Scout`] session.
pub struct Player<D, O, F> {
    scout: Scout<D, O, F>,
}

impl<D: PageDriver, O: MoveOracle, F: SideFactory> Player<D, O, F> {
    pub fn new(scout: Scout<D, O, F>) -> Self {
        Self { scout }
    }

    pub fn scout(&self) -> &Scout<D, O, F> {
        &self.scout
    }

    /// The highest-cost move for the side rendered at the bottom of the
    /// screen, annotated with whatever occupies its destination square.
    pub fn best_move(&self) -> Result<ScoredMove, ScoutError> {
        let model = self.scout.scrape()?;
        let perspective = resolve_perspective(self.scout.driver());
        let color = perspective.bottom_color();
        let moves = self.scout.oracle().scored_moves(&model, color);
        // First of the maxima, so tied costs resolve deterministically.
        let mut best = moves
            .into_iter()
            .reduce(|best, m| if m.cost > best.cost { m } else { best })
            .ok_or(ScoutError::NoMoves(color.label()))?;
        best.captured = model.board.figure_at(best.to).copied();
        Ok(best)
    }

    /// Makes the best move on the page. Actuation failures are logged and
    /// the chosen move is still returned: the caller already knows what the
    /// move was, and a flaky click must not lose that report.
    pub fn make_move(&self) -> Result<ScoredMove, ScoutError> {
        let best = self.best_move()?;
        if let Err(err) = self.actuate(&best) {
            warn!("an exception occurred while performing the move: {}", err);
        }
        Ok(best)
    }

    fn actuate(&self, mv: &ScoredMove) -> Result<(), PageError> {
        let driver = self.scout.driver();
        let target_class = match &mv.captured {
            Some(captured) => figure_class(captured, mv.to),
            None => hint_class(mv.to),
        };
        let source = driver.find_element(&class_xpath(&figure_class(&mv.figure, mv.from)))?;
        source.click()?;
        let target = driver.find_element(&class_xpath(&target_class))?;
        driver.drag_and_drop(&source, &target)
    }
}

/// A continuous-play worker. The flag is read once per iteration, so
/// clearing it stops the loop after the current move completes, never in
/// the middle of one.
pub struct Autoplay {
    flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Autoplay {
    pub fn start<D, O, F>(player: Player<D, O, F>, interval: Duration) -> Self
    where
        D: PageDriver + Send + 'static,
        O: MoveOracle + Send + 'static,
        F: SideFactory + Send + 'static,
    {
        let flag = Arc::new(AtomicBool::new(true));
        let worker_flag = Arc::clone(&flag);
        let handle = thread::spawn(move || {
            while worker_flag.load(Ordering::SeqCst) {
                match player.make_move() {
                    Ok(mv) => info!("played {}", mv),
                    Err(err) => warn!("skipping this cycle: {}", err),
                }
                thread::sleep(interval);
            }
        });
        Self {
            flag,
            handle: Some(handle),
        }
    }

    /// The shared stop flag, for wiring to an external control path.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Signals the loop to stop and waits for the current iteration.
    pub fn stop(mut self) {
        self.flag.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceKind, SideColor};
    use crate::orientation::CAPTURED_PIECES_SELECTOR;
    use crate::reconcile::{BoardModel, DefaultSideFactory, ScrapeStrategy, BOT_BOARD_SELECTOR};
    use crate::snapshot::{PageAction, PageSnapshot, SnapshotDriver, SnapshotElement};
    use pretty_assertions::assert_eq;

    struct FixedOracle {
        moves: Vec<ScoredMove>,
        color: SideColor,
    }

    impl MoveOracle for FixedOracle {
        fn scored_moves(&self, _model: &BoardModel, color: SideColor) -> Vec<ScoredMove> {
            if color == self.color {
                self.moves.clone()
            } else {
                Vec::new()
            }
        }
    }

    fn queen_move(cost: i32, to: Square) -> ScoredMove {
        ScoredMove {
            figure: Figure::new(SideColor::Light, PieceKind::Queen),
            from: Square::new(3, 3),
            to,
            captured: None,
            cost,
        }
    }

    fn scout_over(
        elements: Vec<SnapshotElement>,
        oracle: FixedOracle,
    ) -> Scout<SnapshotDriver, FixedOracle, DefaultSideFactory> {
        let driver = SnapshotDriver::new(PageSnapshot::with_elements(elements));
        Scout::new(driver, oracle, DefaultSideFactory, "https://www.chess.com/")
            .with_strategy(ScrapeStrategy::VsBot)
    }

    #[test]
    fn test_quiet_move_drags_to_hint_square() {
        // Queen on page square 45, destination hint on 55.
        let elements = vec![
            SnapshotElement::new(BOT_BOARD_SELECTOR, "piece wq square-45"),
            SnapshotElement::new(BOT_BOARD_SELECTOR, "hint square-55"),
        ];
        let oracle = FixedOracle {
            moves: vec![queen_move(1, Square::new(3, 4))],
            color: SideColor::Light,
        };
        let player = Player::new(scout_over(elements, oracle));
        let played = player.make_move().unwrap();
        assert_eq!(played.cost, 1);
        let actions = player.scout().driver().actions();
        assert_eq!(
            actions,
            vec![
                PageAction::Clicked("piece wq square-45".to_string()),
                PageAction::Dragged {
                    source: "piece wq square-45".to_string(),
                    target: "hint square-55".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_capture_drags_onto_the_captured_figure() {
        let elements = vec![
            SnapshotElement::new(BOT_BOARD_SELECTOR, "piece wq square-45"),
            SnapshotElement::new(BOT_BOARD_SELECTOR, "piece bp square-55"),
        ];
        let oracle = FixedOracle {
            // The stub leaves `captured` empty; annotation must fill it
            // from the grid.
            moves: vec![queen_move(1, Square::new(3, 4))],
            color: SideColor::Light,
        };
        let player = Player::new(scout_over(elements, oracle));
        let played = player.make_move().unwrap();
        assert_eq!(played.captured.unwrap().kind, PieceKind::Pawn);
        let actions = player.scout().driver().actions();
        assert!(actions.contains(&PageAction::Dragged {
            source: "piece wq square-45".to_string(),
            target: "piece bp square-55".to_string(),
        }));
    }

    #[test]
    fn test_dark_at_bottom_plays_dark() {
        let elements = vec![
            SnapshotElement::new(BOT_BOARD_SELECTOR, "piece bq square-45"),
            SnapshotElement::new(CAPTURED_PIECES_SELECTOR, "").with_attr("player-color", "2"),
        ];
        let oracle = FixedOracle {
            moves: vec![ScoredMove {
                figure: Figure::new(SideColor::Dark, PieceKind::Queen),
                from: Square::new(3, 3),
                to: Square::new(4, 3),
                captured: None,
                cost: 0,
            }],
            color: SideColor::Dark,
        };
        let player = Player::new(scout_over(elements, oracle));
        let played = player.best_move().unwrap();
        assert_eq!(played.figure.color, SideColor::Dark);
    }

    #[test]
    fn test_ties_pick_the_first_maximum() {
        let elements = vec![SnapshotElement::new(BOT_BOARD_SELECTOR, "piece wq square-45")];
        let oracle = FixedOracle {
            moves: vec![
                queen_move(2, Square::new(3, 4)),
                queen_move(2, Square::new(3, 5)),
                queen_move(1, Square::new(3, 6)),
            ],
            color: SideColor::Light,
        };
        let player = Player::new(scout_over(elements, oracle));
        assert_eq!(player.best_move().unwrap().to, Square::new(3, 4));
    }

    #[test]
    fn test_failed_actuation_still_returns_the_move() {
        // No hint element on the page: the drag cannot happen.
        let elements = vec![SnapshotElement::new(BOT_BOARD_SELECTOR, "piece wq square-45")];
        let oracle = FixedOracle {
            moves: vec![queen_move(3, Square::new(3, 4))],
            color: SideColor::Light,
        };
        let player = Player::new(scout_over(elements, oracle));
        let played = player.make_move().unwrap();
        assert_eq!(played.cost, 3);
        let actions = player.scout().driver().actions();
        assert!(!actions
            .iter()
            .any(|a| matches!(a, PageAction::Dragged { .. })));
    }

    #[test]
    fn test_no_moves_is_an_error() {
        let elements = vec![SnapshotElement::new(BOT_BOARD_SELECTOR, "piece wq square-45")];
        let oracle = FixedOracle {
            moves: Vec::new(),
            color: SideColor::Light,
        };
        let player = Player::new(scout_over(elements, oracle));
        assert!(matches!(player.best_move(), Err(ScoutError::NoMoves(_))));
    }

    #[test]
    fn test_autoplay_stops_at_iteration_boundary() {
        let elements = vec![
            SnapshotElement::new(BOT_BOARD_SELECTOR, "piece wq square-45"),
            SnapshotElement::new(BOT_BOARD_SELECTOR, "hint square-55"),
        ];
        let oracle = FixedOracle {
            moves: vec![queen_move(1, Square::new(3, 4))],
            color: SideColor::Light,
        };
        let player = Player::new(scout_over(elements, oracle));
        let driver = player.scout().driver().clone();
        let autoplay = Autoplay::start(player, Duration::from_millis(1));
        thread::sleep(Duration::from_millis(25));
        autoplay.stop();
        let dragged = driver
            .actions()
            .iter()
            .filter(|a| matches!(a, PageAction::Dragged { .. }))
            .count();
        assert!(dragged >= 1);
    }
}
