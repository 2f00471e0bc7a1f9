pub mod document_types;
pub mod documents;
pub mod user_credentials;
pub mod users;
