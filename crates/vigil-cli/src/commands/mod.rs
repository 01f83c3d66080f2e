pub mod audit;
pub mod dispatch;
pub mod once;
pub mod parse;
pub mod run;
pub mod seen;
