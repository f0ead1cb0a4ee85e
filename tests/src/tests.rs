mod calc;
mod engine;
mod fill;
mod search;
