//! Ownership checks applied before every mutation.
//!
//! The only rule is exact owner match: a principal may act on a resource iff
//! its id equals the resource owner's id. There are no roles and no
//! administrative override.

use thiserror::Error;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Kind of resource being guarded, used to pick the denial message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Account,
    Todo,
}

impl Resource {
    fn denial_message(self) -> &'static str {
        match self {
            Resource::Account => "You are not authorized to update this user",
            Resource::Todo => "Not enough permissions",
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("{}", .0.denial_message())]
    Forbidden(Resource),
}

/// Allow iff `principal.id == owner_id`.
pub fn authorize(principal: &User, owner_id: UserId, resource: Resource) -> Result<(), AccessError> {
    if principal.id == owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden(resource))
    }
}
