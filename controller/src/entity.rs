// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::book::Book;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, table, Table};
use std::collections::HashMap;

pub trait Entity {
    type Id;

    fn get_id(&self) -> Self::Id;
    fn get_data(&self) -> HashMap<String, String> {
        Default::default()
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = table![["id", self.get_id()]];

        for (key, val) in self.get_data() {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

/// Render a recommendation page as one table, in ranking order.
pub fn ranked_table(books: &[Book]) -> Table {
    let mut table = table![["id", "title", "similarity", "rating", "votes", "yours"]];

    for book in books {
        let user_rating = book
            .user_rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());

        table.add_row(row![
            book.id,
            book.title,
            format!("{:.3}", book.similarity_weight),
            format!("{:.2}", book.rating),
            book.ratings_count,
            user_rating
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}
