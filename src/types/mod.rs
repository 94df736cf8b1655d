pub mod board;
pub mod question;
pub mod sort;
