pub mod document;
pub mod document_type;
pub mod user;

pub use document::{ApprovalDecision, Document, DocumentStatus, DocumentWithRelations};
pub use document_type::DocumentType;
pub use user::{User, UserCredentials};
