use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't found user with id({0})")]
    UserNotFound(String),

    #[error("Couldn't found book with id({0})")]
    BookNotFound(String),

    #[error("An user id is required for this operation")]
    Unauthorized,

    #[error("Rating value ({0}) is out of the [1, 5] range")]
    InvalidRating(i32),
}
