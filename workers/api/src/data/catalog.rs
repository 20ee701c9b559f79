use filmsearch_core::{FilmId, Keyword, Predicate, PredicateResolver};
use serde::Deserialize;
use worker::{wasm_bindgen::JsValue, D1Database};

use crate::data::{DataStoreError, ROLE_ACTOR, ROLE_DIRECTOR};

const SQL_FILMS_BY_TITLE: &str = "\
    SELECT id_film FROM films WHERE titre LIKE '%' || replace(?1, ' ', '%') || '%' \
    UNION \
    SELECT id_film FROM autres_titres WHERE titre LIKE '%' || replace(?1, ' ', '%') || '%'";

const SQL_FILMS_BY_PERSON: &str = "\
    SELECT DISTINCT g.id_film FROM generique g \
    JOIN personnes p ON p.id_personne = g.id_personne \
    WHERE g.role = ?1 \
    AND ((p.nom = ?2 AND p.prenom = ?3) OR (p.prenom = ?2 AND p.nom = ?3) OR p.nom = ?4)";

const SQL_FILMS_BY_COUNTRY_NAME: &str = "\
    SELECT f.id_film FROM films f JOIN pays p ON p.code = f.pays \
    WHERE p.nom LIKE '%' || ?1 || '%'";

const SQL_FILMS_BY_COUNTRY_CODE: &str = "SELECT id_film FROM films WHERE pays = ?1";

const SQL_FILMS_IN_YEAR: &str = "SELECT id_film FROM films WHERE annee = ?1";
const SQL_FILMS_BEFORE_YEAR: &str = "SELECT id_film FROM films WHERE annee < ?1";
const SQL_FILMS_AFTER_YEAR: &str = "SELECT id_film FROM films WHERE annee > ?1";

#[derive(Deserialize)]
struct FilmIdRow {
    id_film: FilmId,
}

/// Resolves query predicates against the film tables in D1
pub struct FilmCatalog<'a> {
    db: &'a D1Database,
}

impl<'a> FilmCatalog<'a> {
    pub fn new(db: &'a D1Database) -> Self {
        FilmCatalog { db }
    }

    async fn film_ids(&self, sql: &str, params: &[JsValue]) -> Result<Vec<FilmId>, DataStoreError> {
        let rows = self
            .db
            .prepare(sql)
            .bind(params)?
            .all()
            .await?
            .results::<FilmIdRow>()?;
        Ok(rows.into_iter().map(|row| row.id_film).collect())
    }

    async fn by_person(&self, role: &str, name: &str) -> Result<Vec<FilmId>, DataStoreError> {
        // "Christopher Nolan", "Nolan Christopher" and plain "Nolan" all match
        let (head, tail) = name.split_once(' ').unwrap_or((name, ""));
        self.film_ids(
            SQL_FILMS_BY_PERSON,
            &[role.into(), head.into(), tail.into(), name.into()],
        )
        .await
    }

    async fn by_country(&self, country: &str) -> Result<Vec<FilmId>, DataStoreError> {
        let country = country.replace(' ', "-").to_uppercase();
        if country.chars().count() > 2 {
            self.film_ids(SQL_FILMS_BY_COUNTRY_NAME, &[country.into()])
                .await
        } else {
            self.film_ids(SQL_FILMS_BY_COUNTRY_CODE, &[country.into()])
                .await
        }
    }

    async fn by_year(&self, sql: &str, predicate: &Predicate) -> Result<Vec<FilmId>, DataStoreError> {
        let year = predicate
            .year()
            .ok_or_else(|| DataStoreError::InvalidValue(predicate.to_string()))?;
        self.film_ids(sql, &[year.into()]).await
    }
}

impl PredicateResolver for FilmCatalog<'_> {
    type Error = DataStoreError;

    async fn resolve(&self, predicate: &Predicate) -> Result<Vec<FilmId>, DataStoreError> {
        let value = predicate.value();
        match predicate.keyword() {
            Keyword::Title => self.film_ids(SQL_FILMS_BY_TITLE, &[value.into()]).await,
            Keyword::Director => self.by_person(ROLE_DIRECTOR, value).await,
            Keyword::Actor => self.by_person(ROLE_ACTOR, value).await,
            Keyword::Country => self.by_country(value).await,
            Keyword::Year => self.by_year(SQL_FILMS_IN_YEAR, predicate).await,
            Keyword::BeforeYear => self.by_year(SQL_FILMS_BEFORE_YEAR, predicate).await,
            Keyword::AfterYear => self.by_year(SQL_FILMS_AFTER_YEAR, predicate).await,
        }
    }
}
