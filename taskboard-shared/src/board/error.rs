/// Error taxonomy for the board core
///
/// Operations return the most specific variant possible and never swallow a
/// failure. Missing entities are always reported before authorization is
/// evaluated, so a caller holding a stale ID sees NotFound rather than
/// Forbidden.
///
/// The API layer maps variants to HTTP statuses through [`BoardError::kind`];
/// the core never encodes a status code itself.

use crate::models::membership::MemberRole;

/// Broad classification of a board error
///
/// One kind per transport outcome: the API layer switches on this rather
/// than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist
    NotFound,

    /// The entity exists but the requester lacks the required relationship
    Forbidden,

    /// A uniqueness rule was violated
    Conflict,

    /// A domain rule not covered by the kinds above
    InvalidState,

    /// Storage failure
    Internal,
}

/// Error type for all board core operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Referenced project does not exist
    #[error("Project not found")]
    ProjectNotFound,

    /// Referenced task does not exist
    #[error("Task not found")]
    TaskNotFound,

    /// Referenced comment does not exist
    #[error("Comment not found")]
    CommentNotFound,

    /// No user matches the given email
    #[error("User not found")]
    UserNotFound,

    /// The target user has no membership row in the project
    #[error("Member not found in project")]
    MemberNotFound,

    /// Requester is not a member of the project
    #[error("Not a member of this project")]
    NotMember,

    /// Requester's role is below what the operation requires
    #[error("Insufficient role: requires {required}, has {actual}")]
    InsufficientRole {
        required: MemberRole,
        actual: MemberRole,
    },

    /// Only the project owner may perform this operation
    #[error("Only the project owner can delete the project")]
    NotProjectOwner,

    /// Requester is neither creator, assignee, project owner, nor admin
    #[error("Only the task creator, assignee, or a project admin can delete a task")]
    TaskDeleteDenied,

    /// Requester did not write the comment
    #[error("Only the comment author can delete a comment")]
    NotCommentAuthor,

    /// The user already has a membership row for this project
    #[error("User is already a member of this project")]
    AlreadyMember,

    /// Comment content was empty after trimming
    #[error("Comment content cannot be empty")]
    EmptyComment,

    /// The owner's membership row is permanent while the project exists
    #[error("Cannot remove the project owner")]
    CannotRemoveOwner,

    /// The owner role is assigned at project creation only
    #[error("The owner role cannot be granted to an invited member")]
    OwnerRoleReserved,

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BoardError {
    /// Classifies this error into the broad taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::ProjectNotFound
            | BoardError::TaskNotFound
            | BoardError::CommentNotFound
            | BoardError::UserNotFound
            | BoardError::MemberNotFound => ErrorKind::NotFound,

            BoardError::NotMember
            | BoardError::InsufficientRole { .. }
            | BoardError::NotProjectOwner
            | BoardError::TaskDeleteDenied
            | BoardError::NotCommentAuthor => ErrorKind::Forbidden,

            BoardError::AlreadyMember => ErrorKind::Conflict,

            BoardError::EmptyComment
            | BoardError::CannotRemoveOwner
            | BoardError::OwnerRoleReserved => ErrorKind::InvalidState,

            BoardError::Database(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        assert_eq!(BoardError::ProjectNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BoardError::TaskNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BoardError::CommentNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BoardError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BoardError::MemberNotFound.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_forbidden_kinds() {
        assert_eq!(BoardError::NotMember.kind(), ErrorKind::Forbidden);
        assert_eq!(BoardError::NotProjectOwner.kind(), ErrorKind::Forbidden);
        assert_eq!(BoardError::TaskDeleteDenied.kind(), ErrorKind::Forbidden);
        assert_eq!(BoardError::NotCommentAuthor.kind(), ErrorKind::Forbidden);
        assert_eq!(
            BoardError::InsufficientRole {
                required: MemberRole::Admin,
                actual: MemberRole::Member,
            }
            .kind(),
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn test_conflict_and_invalid_state_kinds() {
        assert_eq!(BoardError::AlreadyMember.kind(), ErrorKind::Conflict);
        assert_eq!(BoardError::EmptyComment.kind(), ErrorKind::InvalidState);
        assert_eq!(BoardError::CannotRemoveOwner.kind(), ErrorKind::InvalidState);
        assert_eq!(BoardError::OwnerRoleReserved.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_insufficient_role_message() {
        let err = BoardError::InsufficientRole {
            required: MemberRole::Admin,
            actual: MemberRole::Member,
        };
        assert_eq!(err.to_string(), "Insufficient role: requires admin, has member");
    }
}
