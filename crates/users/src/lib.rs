//! `usersvc-users` — the user record, its validation rules, and the listing
//! engine (filter, sort, paginate).
//!
//! Pure functions over slices of records; storage lives in `usersvc-infra`.

pub mod listing;
pub mod seed;
pub mod user;
pub mod validation;

pub use listing::{
    list_users, FilterEcho, ListQuery, ListRequest, PaginationInfo, SortEcho, SortField, SortOrder,
    UserPage,
};
pub use seed::seed_users;
pub use user::{EmailAddress, NewUser, User, UserName};
pub use validation::{validate_payload, UserPayload};
