//! Single play session: request, board, reveal, completion.
use crate::board::{BOARD_SIZE, Board, BoardMismatch, TripleReport, build_board, verify_board};
use crate::prize::{GameResult, Prize};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of one play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    /// Nothing requested yet, or the last request failed.
    #[default]
    Idle,
    /// Waiting on the server for an authoritative result.
    Loading,
    /// Board built; the player is scratching.
    Playing,
    /// Every cell revealed.
    Completed,
}

impl PlayState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a play is already in progress")]
    Busy,
    #[error("cannot {action} while {}", .state.label())]
    InvalidTransition {
        action: &'static str,
        state: PlayState,
    },
    #[error("cell {0} is not on the board")]
    CellOutOfRange(usize),
    #[error("this scratch card has no prizes configured")]
    EmptyCatalog,
}

/// State owned by the play screen. Every field is replaced wholesale on each play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaySession {
    state: PlayState,
    result: Option<GameResult>,
    board: Board,
    revealed: [bool; BOARD_SIZE],
    celebration: Option<TripleReport>,
    mismatch: Option<BoardMismatch>,
    notice: Option<String>,
    balance_refresh_pending: bool,
}

impl PlaySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> PlayState {
        self.state
    }

    #[must_use]
    pub const fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Local reading of the finished board, set on completion.
    #[must_use]
    pub const fn celebration(&self) -> Option<&TripleReport> {
        self.celebration.as_ref()
    }

    /// Disagreement between the built board and the server result, if any.
    #[must_use]
    pub const fn mismatch(&self) -> Option<&BoardMismatch> {
        self.mismatch.as_ref()
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&String> {
        self.notice.as_ref()
    }

    /// Hand the pending notice to the caller, clearing it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Whether a balance refresh was requested and not yet taken.
    pub fn take_balance_refresh(&mut self) -> bool {
        std::mem::take(&mut self.balance_refresh_pending)
    }

    /// Play button guard.
    #[must_use]
    pub const fn can_play(&self) -> bool {
        matches!(self.state, PlayState::Idle | PlayState::Completed)
    }

    #[must_use]
    pub fn is_revealed(&self, cell: usize) -> bool {
        self.revealed.get(cell).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Enter `Loading` ahead of the play request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] while a play is loading or being revealed.
    pub fn request_play(&mut self) -> Result<(), SessionError> {
        if !self.can_play() {
            return Err(SessionError::Busy);
        }
        self.reset_round();
        self.state = PlayState::Loading;
        Ok(())
    }

    /// Start another round after completion, discarding the previous board.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless the session is `Completed`.
    pub fn play_again(&mut self) -> Result<(), SessionError> {
        if self.state != PlayState::Completed {
            return Err(SessionError::InvalidTransition {
                action: "play again",
                state: self.state,
            });
        }
        self.request_play()
    }

    /// Accept the server result and build the reveal grid.
    ///
    /// An empty catalog sends the session back to `Idle` with a notice, since
    /// no honest board can be drawn for it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless `Loading`, or
    /// [`SessionError::EmptyCatalog`] when there is nothing to draw.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        result: GameResult,
        catalog: &[Prize],
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if self.state != PlayState::Loading {
            return Err(SessionError::InvalidTransition {
                action: "resolve a play",
                state: self.state,
            });
        }
        if catalog.is_empty() {
            let err = SessionError::EmptyCatalog;
            self.fail(err.to_string());
            return Err(err);
        }

        let board = build_board(&result, catalog, rng);
        match verify_board(&result, &board) {
            Ok(_) => self.mismatch = None,
            Err(mismatch) => {
                log::warn!("board disagrees with server result: {mismatch}");
                self.mismatch = Some(mismatch);
            }
        }
        self.board = board;
        self.result = Some(result);
        self.state = PlayState::Playing;
        Ok(())
    }

    /// Abandon a pending play after a failed request.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.reset_round();
        self.state = PlayState::Idle;
        self.notice = Some(message.into());
    }

    /// Scratch one cell. Returns `true` when this reveal completed the board.
    ///
    /// Revealing an already revealed cell is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless `Playing`, or
    /// [`SessionError::CellOutOfRange`] for an index past the board.
    pub fn reveal(&mut self, cell: usize) -> Result<bool, SessionError> {
        if self.state != PlayState::Playing {
            return Err(SessionError::InvalidTransition {
                action: "reveal a cell",
                state: self.state,
            });
        }
        if cell >= self.board.len() {
            return Err(SessionError::CellOutOfRange(cell));
        }
        self.revealed[cell] = true;
        if self.revealed_count() == self.board.len() {
            self.complete();
            return Ok(true);
        }
        Ok(false)
    }

    /// Scratch every remaining cell and complete the board.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless `Playing`.
    pub fn reveal_all(&mut self) -> Result<(), SessionError> {
        if self.state != PlayState::Playing {
            return Err(SessionError::InvalidTransition {
                action: "reveal the board",
                state: self.state,
            });
        }
        let cells = self.board.len();
        self.revealed
            .iter_mut()
            .take(cells)
            .for_each(|cell| *cell = true);
        self.complete();
        Ok(())
    }

    fn complete(&mut self) {
        self.celebration = Some(crate::board::detect_triple(&self.board));
        self.balance_refresh_pending = true;
        self.state = PlayState::Completed;
    }

    fn reset_round(&mut self) {
        self.result = None;
        self.board = Board::default();
        self.revealed = [false; BOARD_SIZE];
        self.celebration = None;
        self.mismatch = None;
        self.notice = None;
        self.balance_refresh_pending = false;
    }
}
