mod collection;
mod error;
mod http_mapping;
mod traits;
mod types;

pub use collection::{from_document, to_document, TypedCollection};
pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{DocumentStore, Loader};
pub use types::{document_id, Document, ID_FIELD};
