//! DevCard Core - Core library for DevCard GitHub profile cards
//!
//! This crate holds everything that does not talk to GitHub directly: the card
//! data model, language aggregation, the fetch fan-out over a
//! [`ProfileSource`], the form/page state, and the HTML and text renderers.

pub mod config;
pub mod error;
pub mod languages;
pub mod models;
pub mod page;
pub mod render;
pub mod secrets;
pub mod source;
pub mod username;

pub use config::{CardConfig, Config, GitHubConfig, ServerConfig};
pub use error::{Error, Result};
pub use languages::LanguageBytes;
pub use models::{DevCard, LanguageShare, RepoSummary, SocialAccount, UserProfile};
pub use page::{FetchTicket, PageState, ProfileForm, FETCH_ERROR_MESSAGE};
pub use secrets::Secrets;
pub use source::{DevCardLoader, ProfileSource};
pub use username::Username;
