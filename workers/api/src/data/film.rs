use filmsearch_core::{FilmId, FilmInfo, PersonName, RecordFormatter};
use serde::Deserialize;
use worker::{wasm_bindgen::JsValue, D1Database, D1PreparedStatement};

use crate::data::{DataStoreError, ROLE_ACTOR, ROLE_DIRECTOR};

const SQL_FILM: &str = "\
    SELECT f.titre, coalesce(p.nom, f.pays, '') AS pays, f.annee, f.duree \
    FROM films f LEFT JOIN pays p ON p.code = f.pays \
    WHERE f.id_film = ?1";

const SQL_CREDITS: &str = "\
    SELECT p.nom, p.prenom, g.role FROM generique g \
    JOIN personnes p ON p.id_personne = g.id_personne \
    WHERE g.id_film = ?1 AND g.role IN (?2, ?3)";

const SQL_OTHER_TITLES: &str = "SELECT titre FROM autres_titres WHERE id_film = ?1";

#[derive(Deserialize)]
struct FilmRow {
    titre: String,
    pays: String,
    annee: i32,
    duree: Option<i32>,
}

#[derive(Deserialize)]
struct CreditRow {
    nom: String,
    prenom: Option<String>,
    role: String,
}

#[derive(Deserialize)]
struct TitleRow {
    titre: String,
}

/// Statements sent per film: the film row, its credits, its other titles
const STATEMENTS_PER_FILM: usize = 3;

/// Loads the display record of films from D1
pub struct FilmStore<'a> {
    db: &'a D1Database,
}

impl<'a> FilmStore<'a> {
    pub fn new(db: &'a D1Database) -> Self {
        FilmStore { db }
    }

    fn film_statements(&self, id: FilmId) -> Result<Vec<D1PreparedStatement>, DataStoreError> {
        let film_id = JsValue::from(id);
        Ok(vec![
            self.db.prepare(SQL_FILM).bind(&[film_id.clone()])?,
            self.db.prepare(SQL_CREDITS).bind(&[
                film_id.clone(),
                ROLE_DIRECTOR.into(),
                ROLE_ACTOR.into(),
            ])?,
            self.db.prepare(SQL_OTHER_TITLES).bind(&[film_id])?,
        ])
    }

    /// Load every film in one batch round trip, keeping the order of `ids`
    pub async fn get_films(&self, ids: &[FilmId]) -> Result<Vec<FilmInfo>, DataStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut statements = Vec::with_capacity(ids.len() * STATEMENTS_PER_FILM);
        for id in ids {
            statements.extend(self.film_statements(*id)?);
        }

        let mut results = self.db.batch(statements).await?.into_iter();
        ids.iter()
            .map(|id| {
                let (Some(film), Some(credits), Some(titles)) =
                    (results.next(), results.next(), results.next())
                else {
                    return Err(DataStoreError::NotFound(*id));
                };
                assemble_film(
                    *id,
                    film.results::<FilmRow>()?.into_iter().next(),
                    credits.results::<CreditRow>()?,
                    titles.results::<TitleRow>()?,
                )
            })
            .collect()
    }
}

fn assemble_film(
    id: FilmId,
    film: Option<FilmRow>,
    credits: Vec<CreditRow>,
    other_titles: Vec<TitleRow>,
) -> Result<FilmInfo, DataStoreError> {
    let film = film.ok_or(DataStoreError::NotFound(id))?;
    let (directors, actors): (Vec<CreditRow>, Vec<CreditRow>) = credits
        .into_iter()
        .partition(|credit| credit.role == ROLE_DIRECTOR);
    Ok(FilmInfo::new(
        film.titre,
        directors.into_iter().map(person_name).collect(),
        actors.into_iter().map(person_name).collect(),
        film.pays,
        film.annee,
        film.duree.unwrap_or(0),
        other_titles.into_iter().map(|row| row.titre).collect(),
    ))
}

fn person_name(credit: CreditRow) -> PersonName {
    PersonName::new(credit.nom, credit.prenom.filter(|first| !first.is_empty()))
}

impl RecordFormatter for FilmStore<'_> {
    type Error = DataStoreError;

    async fn format(&self, ids: &[FilmId]) -> Result<Vec<FilmInfo>, DataStoreError> {
        self.get_films(ids).await
    }
}
