// Job reference capture: URL allow-listing, job id parsing, swappable job source.

pub mod extractor;
pub mod handlers;
pub mod url_validator;
