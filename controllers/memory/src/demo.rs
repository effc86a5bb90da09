//! A small seeded catalog so the REPL has something to recommend from
//! without a database around.

use crate::MemoryController;
use controller::{
    AgeRestriction, Book, Catalog, Genre, Rating, Result, ShelfKind, User, UserStore,
};
use std::collections::HashSet;

fn set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn book(
    id: &str,
    title: &str,
    language: &str,
    pages: u32,
    age: AgeRestriction,
    genres: &[&str],
    authors: &[&str],
) -> Book {
    Book {
        id: id.into(),
        title: title.into(),
        language: language.into(),
        pages,
        age_restriction: age,
        genres: set(genres),
        authors: set(authors),
        ..Default::default()
    }
}

pub fn demo_controller() -> Result<MemoryController> {
    let controller = MemoryController::new();

    for (id, name) in &[
        ("fantasy", "Fantasy"),
        ("mystery", "Mystery"),
        ("scifi", "Science Fiction"),
        ("romance", "Romance"),
        ("horror", "Horror"),
    ] {
        controller.add_genre(Genre {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    let books = vec![
        book("b01", "The Hobbit", "en", 310, AgeRestriction::Everyone, &["fantasy"], &["tolkien"]),
        book("b02", "The Fellowship of the Ring", "en", 423, AgeRestriction::Teen, &["fantasy"], &["tolkien"]),
        book("b03", "A Study in Scarlet", "en", 120, AgeRestriction::Teen, &["mystery"], &["doyle"]),
        book("b04", "The Hound of the Baskervilles", "en", 180, AgeRestriction::Teen, &["mystery", "horror"], &["doyle"]),
        book("b05", "Dune", "en", 412, AgeRestriction::Teen, &["scifi"], &["herbert"]),
        book("b06", "Foundation", "en", 255, AgeRestriction::Teen, &["scifi"], &["asimov"]),
        book("b07", "I, Robot", "en", 224, AgeRestriction::Everyone, &["scifi", "mystery"], &["asimov"]),
        book("b08", "Pride and Prejudice", "en", 279, AgeRestriction::Everyone, &["romance"], &["austen"]),
        book("b09", "Emma", "en", 474, AgeRestriction::Everyone, &["romance"], &["austen"]),
        book("b10", "Dracula", "en", 418, AgeRestriction::Mature, &["horror"], &["stoker"]),
        book("b11", "El nombre del viento", "es", 662, AgeRestriction::YoungAdult, &["fantasy"], &["rothfuss"]),
        book("b12", "The Martian", "en", 369, AgeRestriction::Teen, &["scifi"], &["weir"]),
    ];

    for book in books {
        controller.add_book(book);
    }

    // Pre-existing aggregate ratings, as if the catalog had been live for
    // a while already.
    for (id, rating, count) in &[
        ("b01", 4.6, 320),
        ("b02", 4.4, 280),
        ("b03", 4.1, 150),
        ("b04", 4.2, 90),
        ("b05", 4.3, 400),
        ("b06", 4.0, 210),
        ("b07", 3.9, 175),
        ("b08", 4.5, 500),
        ("b09", 4.0, 130),
        ("b10", 3.8, 95),
        ("b11", 4.7, 60),
        ("b12", 4.2, 340),
    ] {
        controller.update_book_rating(&id.to_string(), *rating, *count)?;
    }

    controller.add_user(User {
        id: "alice".into(),
        name: "Alice".into(),
        ..Default::default()
    });
    controller.add_user(User {
        id: "bruno".into(),
        name: "Bruno".into(),
        ..Default::default()
    });

    // Some history so the flows have signal to work with.
    for (user, book, value) in &[
        ("alice", "b01", 5),
        ("alice", "b03", 4),
        ("bruno", "b08", 5),
        ("bruno", "b05", 2),
    ] {
        let user = user.to_string();
        let book = book.to_string();

        controller.save_rating(Rating::new(&user, &book, *value))?;
    }

    controller.shelve(&"alice".to_string(), ShelfKind::Favorite, &"b01".to_string());
    controller.shelve(&"alice".to_string(), ShelfKind::Read, &"b03".to_string());
    controller.shelve(&"bruno".to_string(), ShelfKind::Reading, &"b09".to_string());

    Ok(controller)
}
