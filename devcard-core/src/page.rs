//! Form and page state for a DevCard view
//!
//! One form, one card. Submitting moves the page to `Loading`; the fetch result
//! moves it to `Ready` or `Failed`. Results from a superseded submission are
//! dropped so a slow earlier fetch cannot overwrite a newer one.

use tracing::{debug, warn};

use crate::models::DevCard;
use crate::{Result, Username};

/// The one message users see when a fetch fails
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching data";

/// What the page is currently showing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Waiting for a fetch to complete
    Loading { username: Username },
    /// A card is available
    Ready(Box<DevCard>),
    /// The last submission failed
    Failed { message: String },
}

impl PageState {
    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading { .. })
    }

    /// The error message, if the page is in the failed state
    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The card, only when loaded and not superseded by an error
    pub fn card(&self) -> Option<&DevCard> {
        match self {
            PageState::Ready(card) => Some(card),
            _ => None,
        }
    }
}

/// Identifies one submission so its result can be matched up later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    username: Username,
}

impl FetchTicket {
    /// The username this fetch is for
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Submission counter value when this ticket was issued
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Username input plus the page state it drives
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    input: String,
    state: PageState,
    generation: u64,
}

impl ProfileForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form with the input pre-filled
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Replace the input text
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current page state
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Submit the form
    ///
    /// Blank input is ignored and returns `None` without touching the state.
    /// Invalid usernames fail immediately. Otherwise the page enters
    /// `Loading` and the returned ticket must be passed to [`complete`].
    ///
    /// [`complete`]: ProfileForm::complete
    pub fn submit(&mut self) -> Option<FetchTicket> {
        if self.input.trim().is_empty() {
            return None;
        }

        self.generation += 1;

        match Username::parse(&self.input) {
            Ok(username) => {
                debug!(username = %username, generation = self.generation, "Form submitted");
                self.state = PageState::Loading {
                    username: username.clone(),
                };
                Some(FetchTicket {
                    generation: self.generation,
                    username,
                })
            }
            Err(e) => {
                warn!(input = %self.input, error = %e, "Rejected username");
                self.state = PageState::Failed {
                    message: FETCH_ERROR_MESSAGE.to_string(),
                };
                None
            }
        }
    }

    /// Apply the result of a fetch
    ///
    /// Returns `false` when the ticket belongs to a superseded submission, in
    /// which case the result is discarded.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<DevCard>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                username = %ticket.username,
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return false;
        }

        self.state = match result {
            Ok(card) => PageState::Ready(Box::new(card)),
            Err(e) => {
                warn!(username = %ticket.username, error = %e, "Fetch failed");
                PageState::Failed {
                    message: FETCH_ERROR_MESSAGE.to_string(),
                }
            }
        };
        true
    }
}
