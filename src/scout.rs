use log::warn;

use crate::auth::{authorize, Credentials};
use crate::board::SideColor;
use crate::error::ScoutError;
use crate::oracle::MoveOracle;
use crate::page::PageDriver;
use crate::reconcile::{scrape_board, BoardModel, ScrapeStrategy, SideFactory};
use crate::summary::{render_moves, truncate_moves};

/// One observation session: a page handle, the oracle it consults and the
/// policy knobs for scraping and reporting.
pub struct Scout<D, O, F> {
    driver: D,
    oracle: O,
    sides: F,
    url: String,
    strategy: ScrapeStrategy,
    n_best: usize,
    n_worst: usize,
    credentials: Option<Credentials>,
}

impl<D: PageDriver, O: MoveOracle, F: SideFactory> Scout<D, O, F> {
    pub fn new(driver: D, oracle: O, sides: F, url: &str) -> Self {
        Self {
            driver,
            oracle,
            sides,
            url: url.to_string(),
            strategy: ScrapeStrategy::Universal,
            n_best: 3,
            n_worst: 3,
            credentials: None,
        }
    }

    pub fn with_strategy(mut self, strategy: ScrapeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_truncation(mut self, n_best: usize, n_worst: usize) -> Self {
        self.n_best = n_best;
        self.n_worst = n_worst;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Opens the target page and attempts authorization when credentials
    /// were supplied. A failed login is logged and the session continues
    /// unauthenticated.
    pub fn open(&self) -> Result<(), ScoutError> {
        self.driver.goto(&self.url)?;
        if let Some(credentials) = &self.credentials {
            if let Err(err) = authorize(&self.driver, credentials) {
                warn!("continuing without authorization: {}", err);
            }
        }
        Ok(())
    }

    /// Scrapes the current page into a fresh board model.
    pub fn scrape(&self) -> Result<BoardModel, ScoutError> {
        scrape_board(&self.driver, self.strategy, &self.sides)
    }

    /// Scrapes once and reports both sides' scored moves, truncated to the
    /// configured best/worst counts.
    pub fn parse(&self) -> Result<String, ScoutError> {
        let model = self.scrape()?;
        let light = truncate_moves(
            self.oracle.scored_moves(&model, SideColor::Light),
            self.n_best,
            self.n_worst,
        );
        let dark = truncate_moves(
            self.oracle.scored_moves(&model, SideColor::Dark),
            self.n_best,
            self.n_worst,
        );
        Ok(format!(
            "{}'s moves costs: {}\n{}'s moves costs: {}",
            model.light.label,
            render_moves(&light),
            model.dark.label,
            render_moves(&dark),
        ))
    }
}
