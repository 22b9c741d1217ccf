pub mod build;
pub mod check;
pub mod clean;
pub mod commons;
pub mod default;
pub mod demo;
pub mod env;
pub mod export;
pub mod r#gen;
pub mod new;
pub mod register;
pub mod reset;
pub mod run;
pub mod save;
