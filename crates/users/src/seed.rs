//! Fixed records the store starts with.

use usersvc_core::UserId;

use crate::user::{EmailAddress, NewUser, User, UserName};

const SEED: [(i64, &str, &str); 3] = [
    (1, "John Doe", "john.doe@example.com"),
    (2, "Jane Smith", "jane.smith@example.com"),
    (3, "Bob Johnson", "bob.johnson@example.com"),
];

/// The three seed users, in insertion order.
pub fn seed_users() -> Vec<User> {
    SEED.iter()
        .filter_map(|&(id, name, email)| {
            let id = UserId::new(id).ok()?;
            Some(User::new(
                id,
                NewUser {
                    name: UserName::from_validated(name),
                    email: EmailAddress::from_validated(email),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersvc_core::Entity;

    #[test]
    fn seed_records_pass_validation() {
        for (_, name, email) in SEED {
            assert!(NewUser::parse(name, email).is_ok(), "{name} <{email}>");
        }
    }

    #[test]
    fn seed_ids_are_one_to_three() {
        let ids: Vec<i64> = seed_users().iter().map(|u| u.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
