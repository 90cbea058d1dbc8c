//! Play screen state: one [`PlaySession`] per visit to `/play/:id`.
use crate::scratch::{GameResult, PlaySession, ScratchCard, SessionError};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayScreen {
    session: PlaySession,
    refresh_ticket: u32,
    last_error: Option<SessionError>,
}

pub enum PlayAction {
    Request,
    Resolve {
        result: GameResult,
        card: Rc<ScratchCard>,
        seed: u64,
    },
    Fail(String),
    Reveal(usize),
    RevealAll,
    PlayAgain,
    Reset,
}

impl PlayScreen {
    #[must_use]
    pub const fn session(&self) -> &PlaySession {
        &self.session
    }

    /// Bumped every time a round completes; the balance is re-read on change.
    #[must_use]
    pub const fn refresh_ticket(&self) -> u32 {
        self.refresh_ticket
    }

    #[must_use]
    pub const fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    fn apply(&mut self, action: PlayAction) -> Result<(), SessionError> {
        match action {
            PlayAction::Request => self.session.request_play(),
            PlayAction::Resolve { result, card, seed } => {
                let mut rng = SmallRng::seed_from_u64(seed);
                self.session.resolve(result, &card.prizes, &mut rng)
            }
            PlayAction::Fail(message) => {
                self.session.fail(message);
                Ok(())
            }
            PlayAction::Reveal(cell) => self.session.reveal(cell).map(|_| ()),
            PlayAction::RevealAll => self.session.reveal_all(),
            PlayAction::PlayAgain => self.session.play_again(),
            PlayAction::Reset => {
                self.session = PlaySession::new();
                Ok(())
            }
        }
    }
}

impl Reducible for PlayScreen {
    type Action = PlayAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.last_error = next.apply(action).err();
        if let Some(err) = next.last_error.as_ref() {
            log::debug!("play action ignored: {err}");
        }
        if next.session.take_balance_refresh() {
            next.refresh_ticket = next.refresh_ticket.wrapping_add(1);
        }
        Rc::new(next)
    }
}
