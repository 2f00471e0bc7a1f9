//! Static role policy: which roles may perform which mutating actions.
//!
//! Handlers reload the caller's user row and consult this table before any
//! side effect; the role embedded in the token is informational only.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    Admin,
    DocumentCreator,
    DocumentUploader,
    DocumentApprover,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DocumentCreator => "document_creator",
            Role::DocumentUploader => "document_uploader",
            Role::DocumentApprover => "document_approver",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "document_creator" => Ok(Role::DocumentCreator),
            "document_uploader" => Ok(Role::DocumentUploader),
            "document_approver" => Ok(Role::DocumentApprover),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateDocumentType,
    UpdateDocumentType,
    DeleteDocumentType,
    UploadDocument,
    ApproveDocument,
    DeleteDocument,
}

impl Action {
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Action::CreateDocumentType | Action::UpdateDocumentType => {
                &[Role::Admin, Role::DocumentCreator]
            }
            Action::DeleteDocumentType => &[Role::Admin],
            Action::UploadDocument => &[Role::Admin, Role::DocumentUploader],
            Action::ApproveDocument => &[Role::Admin, Role::DocumentApprover],
            Action::DeleteDocument => &[Role::Admin],
        }
    }

    fn denial_message(self) -> &'static str {
        match self {
            Action::CreateDocumentType => "You do not have permission to create document types",
            Action::UpdateDocumentType => "You do not have permission to update document types",
            Action::DeleteDocumentType => "Only admins can delete document types",
            Action::UploadDocument => "You do not have permission to upload documents",
            Action::ApproveDocument => "You do not have permission to approve documents",
            Action::DeleteDocument => "Only admins can delete documents",
        }
    }
}

/// Fail with Forbidden unless `role` may perform `action`.
pub fn require(role: Role, action: Action) -> Result<(), AppError> {
    if action.allowed_roles().contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(action.denial_message().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_may_do_everything() {
        for action in [
            Action::CreateDocumentType,
            Action::UpdateDocumentType,
            Action::DeleteDocumentType,
            Action::UploadDocument,
            Action::ApproveDocument,
            Action::DeleteDocument,
        ] {
            assert!(require(Role::Admin, action).is_ok());
        }
    }

    #[test]
    fn creator_manages_types_but_not_documents() {
        assert!(require(Role::DocumentCreator, Action::CreateDocumentType).is_ok());
        assert!(require(Role::DocumentCreator, Action::UpdateDocumentType).is_ok());
        assert!(require(Role::DocumentCreator, Action::DeleteDocumentType).is_err());
        assert!(require(Role::DocumentCreator, Action::UploadDocument).is_err());
        assert!(require(Role::DocumentCreator, Action::ApproveDocument).is_err());
    }

    #[test]
    fn uploader_uploads_only() {
        assert!(require(Role::DocumentUploader, Action::UploadDocument).is_ok());
        assert!(require(Role::DocumentUploader, Action::ApproveDocument).is_err());
        assert!(require(Role::DocumentUploader, Action::DeleteDocument).is_err());
        assert!(require(Role::DocumentUploader, Action::CreateDocumentType).is_err());
    }

    #[test]
    fn approver_approves_only() {
        assert!(require(Role::DocumentApprover, Action::ApproveDocument).is_ok());
        assert!(require(Role::DocumentApprover, Action::UploadDocument).is_err());
        assert!(require(Role::DocumentApprover, Action::DeleteDocument).is_err());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [
            Role::Admin,
            Role::DocumentCreator,
            Role::DocumentUploader,
            Role::DocumentApprover,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }
}
