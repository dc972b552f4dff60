pub mod brackets;
