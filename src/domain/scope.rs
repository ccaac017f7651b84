//! Access scoping - which cases a caller may see.
//!
//! A caller's role and profile ids reduce to a `CaseScope`, a tagged value
//! consumed uniformly by list and single-record queries. The same predicate
//! decides both, so a filtered list and a 404 on direct fetch can never
//! disagree.

use uuid::Uuid;

use super::user::UserRole;

/// Ownership fields of a case, as seen by the scoping predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseOwnership {
    /// Client profile the case belongs to
    pub client_id: Uuid,
    /// User who created the case
    pub created_by_id: Uuid,
    /// Employee profile the case is assigned to, if any
    pub assigned_to_id: Option<Uuid>,
}

/// Visibility scope computed from a caller's identity.
///
/// A caller whose role expects a profile but has none gets a scope that
/// matches nothing, never an error: lists come back empty and direct
/// fetches read as not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseScope {
    /// Admins see every case
    Unrestricted,
    /// Clients see cases belonging to their client profile
    Client(Option<Uuid>),
    /// Employees see cases assigned to their profile or created by them
    Employee {
        profile_id: Option<Uuid>,
        user_id: Uuid,
    },
}

impl CaseScope {
    /// Compute the scope for a caller.
    pub fn for_caller(
        role: UserRole,
        user_id: Uuid,
        client_profile_id: Option<Uuid>,
        employee_profile_id: Option<Uuid>,
    ) -> Self {
        match role {
            UserRole::Admin => CaseScope::Unrestricted,
            UserRole::Client => CaseScope::Client(client_profile_id),
            UserRole::Employee => CaseScope::Employee {
                profile_id: employee_profile_id,
                user_id,
            },
        }
    }

    /// The visibility predicate: may a caller with this scope see the case?
    pub fn permits(&self, case: &CaseOwnership) -> bool {
        match self {
            CaseScope::Unrestricted => true,
            CaseScope::Client(Some(client_id)) => case.client_id == *client_id,
            CaseScope::Client(None) => false,
            CaseScope::Employee {
                profile_id,
                user_id,
            } => {
                case.created_by_id == *user_id
                    || matches!((profile_id, case.assigned_to_id), (Some(p), Some(a)) if *p == a)
            }
        }
    }

    /// True when the scope can never match any case.
    pub fn matches_nothing(&self) -> bool {
        matches!(self, CaseScope::Client(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(client: Uuid, creator: Uuid, assignee: Option<Uuid>) -> CaseOwnership {
        CaseOwnership {
            client_id: client,
            created_by_id: creator,
            assigned_to_id: assignee,
        }
    }

    #[test]
    fn admin_sees_everything() {
        let scope = CaseScope::for_caller(UserRole::Admin, Uuid::new_v4(), None, None);
        assert_eq!(scope, CaseScope::Unrestricted);
        assert!(scope.permits(&case(Uuid::new_v4(), Uuid::new_v4(), None)));
    }

    #[test]
    fn client_sees_only_own_cases() {
        let profile = Uuid::new_v4();
        let scope =
            CaseScope::for_caller(UserRole::Client, Uuid::new_v4(), Some(profile), None);

        assert!(scope.permits(&case(profile, Uuid::new_v4(), None)));
        assert!(!scope.permits(&case(Uuid::new_v4(), Uuid::new_v4(), None)));
    }

    #[test]
    fn client_without_profile_sees_nothing() {
        let scope = CaseScope::for_caller(UserRole::Client, Uuid::new_v4(), None, None);
        assert!(scope.matches_nothing());
        assert!(!scope.permits(&case(Uuid::new_v4(), Uuid::new_v4(), None)));
    }

    #[test]
    fn employee_sees_assigned_cases() {
        let user = Uuid::new_v4();
        let profile = Uuid::new_v4();
        let scope = CaseScope::for_caller(UserRole::Employee, user, None, Some(profile));

        let assigned = case(Uuid::new_v4(), Uuid::new_v4(), Some(profile));
        let unrelated = case(Uuid::new_v4(), Uuid::new_v4(), Some(Uuid::new_v4()));
        assert!(scope.permits(&assigned));
        assert!(!scope.permits(&unrelated));
    }

    #[test]
    fn employee_sees_cases_they_created() {
        let user = Uuid::new_v4();
        let scope = CaseScope::for_caller(UserRole::Employee, user, None, None);

        assert!(scope.permits(&case(Uuid::new_v4(), user, None)));
        assert!(!scope.permits(&case(Uuid::new_v4(), Uuid::new_v4(), None)));
    }

    #[test]
    fn employee_without_profile_still_not_matched_by_unassigned_cases() {
        let scope = CaseScope::for_caller(UserRole::Employee, Uuid::new_v4(), None, None);
        assert!(!scope.permits(&case(Uuid::new_v4(), Uuid::new_v4(), None)));
    }
}
