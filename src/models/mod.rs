pub mod attempt;
pub mod flashcard;
pub mod interaction;
pub mod question;
pub mod user;
