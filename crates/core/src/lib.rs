#![forbid(unsafe_code)]

pub mod bank;
pub mod demo;
pub mod grading;
pub mod model;
pub mod random;

pub use bank::{BankError, QuestionBank, RawModule, RawOption, RawQuestion, normalize};
pub use grading::{Verdict, grade};
pub use random::Randomizer;
