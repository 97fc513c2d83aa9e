use apicontract::{Error, SchemaDocument, SchemaValidator};

const FILM_SCHEMA: &str = include_str!("../schemas/film-schema.json");

/// The JSON Schema of a film resource, packaged with the crate.
pub fn film_schema() -> Result<SchemaDocument, Error> {
    SchemaDocument::parse("film-schema.json", FILM_SCHEMA)
}

pub fn film_schema_validator() -> Result<SchemaValidator, Error> {
    SchemaValidator::new(&film_schema()?)
}
