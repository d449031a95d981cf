pub mod auth;
pub mod board;
pub mod coords;
pub mod error;
pub mod observe;
pub mod oracle;
pub mod orientation;
pub mod page;
pub mod player;
pub mod reconcile;
pub mod scout;
pub mod snapshot;
pub mod summary;

pub use auth::{authorize, Credentials};
pub use board::{Board, Figure, PieceKind, SideColor};
pub use coords::{PageSquare, Square};
pub use error::{PageError, ScoutError};
pub use observe::{ObservationExtractor, PieceObservation};
pub use oracle::{MaterialOracle, MoveOracle, ScoredMove};
pub use orientation::{resolve_perspective, Perspective};
pub use page::{PageDriver, PageElement};
pub use player::{Autoplay, Player};
pub use reconcile::{
    reconcile, scrape_board, BoardModel, DefaultSideFactory, ScrapeStrategy, Side, SideFactory,
};
pub use scout::Scout;
pub use snapshot::{PageAction, PageSnapshot, SnapshotDriver, SnapshotElement};
pub use summary::{render_moves, truncate_moves};
