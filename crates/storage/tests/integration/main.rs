mod common;

mod categories;
mod judges;
mod lifecycle;
mod scores;
