//! Display records for search results.

use std::fmt::Display;

use crate::{lexer::FilmId, record::film::FilmInfo};

/// Loads the display records for a capped list of film identifiers,
/// returning them in the same order.
pub trait RecordFormatter {
    type Error: Display;

    async fn format(&self, ids: &[FilmId]) -> Result<Vec<FilmInfo>, Self::Error>;
}

pub mod film;
pub mod person;
