mod common;
mod schema;
