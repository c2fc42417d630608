// Postgres persistence. Everything here is append-or-increment; no row is ever deleted.

pub mod daily;
pub mod votes;
