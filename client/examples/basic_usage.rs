use std::process::exit;

use filmsearch_client::http::Client;
use filmsearch_client::query::{Clause, QueryBuilder, QueryExpr};
use filmsearch_client::{Keyword, Result, SearchResponse};

fn print_films(label: &str, response: &SearchResponse) {
    println!("\n{} found {} films", label, response.result.len());
    for film in &response.result {
        println!(
            "- {} ({}, {}) by {}",
            film.title,
            film.year,
            film.country,
            film.directors.join(", ")
        );
    }
    if let Some(info) = &response.info {
        println!("  note: {}", info);
    }
}

fn main() -> Result<()> {
    // Expect the base URL to be passed as the first argument
    // and an optional API key after
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <base_url> [api_key]", args[0]);
        exit(1);
    }

    let mut client = Client::parse(&args[1])?;
    if let Some(api_key) = args.get(2) {
        client = client.with_api_key(api_key.to_string());
    }

    // Check status
    let status = client.status()?;
    println!("API Status: ready = {}", status.ready);

    // Plain query string
    let results = client.search("titre Inception ou titre Matrix")?;
    print_films("Title search", &results);

    // Same syntax sent as a POST body
    let results = client.search_post("de Nolan, apres 2005")?;
    print_films("Director search", &results);

    // Using QueryExpr directly
    let expr = QueryExpr::clause(Keyword::Actor, "Tom Hanks")
        .or(Clause::new(Keyword::Actor, "Meg Ryan"))
        .and(Clause::new(Keyword::BeforeYear, "2000"));
    println!("\nQuery expression: {}", expr);
    print_films("Expression search", &client.search_expr(&expr)?);

    // Using QueryBuilder fluently
    let builder = QueryBuilder::new().country("France").after(1958).before(1968);
    print_films("Builder search", &client.search_builder(builder)?);

    Ok(())
}
