//! Who may delete a comment.

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// True iff the acting user wrote the comment or carries the administrative
/// role. Pure; the caller decides what to do with a denial.
pub fn may_delete_comment(actor_id: &str, actor_roles: &[String], author_id: &str) -> bool {
    actor_id == author_id || actor_roles.iter().any(|role| role == ROLE_ADMIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_may_delete_own_comment() {
        assert!(may_delete_comment(
            "user-a",
            &["ROLE_CONTRIBUTOR".to_string()],
            "user-a"
        ));
    }

    #[test]
    fn stranger_without_admin_role_may_not_delete() {
        assert!(!may_delete_comment(
            "user-b",
            &["ROLE_CONTRIBUTOR".to_string()],
            "user-a"
        ));
    }

    #[test]
    fn admin_may_delete_any_comment() {
        assert!(may_delete_comment(
            "user-b",
            &["ROLE_ADMIN".to_string()],
            "user-a"
        ));
    }

    #[test]
    fn empty_role_set_falls_back_to_authorship() {
        assert!(!may_delete_comment("user-b", &[], "user-a"));
        assert!(may_delete_comment("user-a", &[], "user-a"));
    }
}
