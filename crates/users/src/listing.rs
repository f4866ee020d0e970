//! Listing engine: validate parameters, filter, sort, paginate.

use core::cmp::Ordering;

use serde::Serialize;

use usersvc_core::{DomainError, DomainResult, Entity};

use crate::user::User;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Email,
}

impl SortField {
    pub const VALID: &'static str = "id, name, email";

    pub fn parse(raw: &str) -> DomainResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            _ => Err(DomainError::invalid_argument(format!(
                "Invalid sortBy value '{raw}'. Valid values are: {}",
                Self::VALID
            ))),
        }
    }

    fn compare(&self, a: &User, b: &User) -> Ordering {
        match self {
            SortField::Id => a.id().cmp(&b.id()),
            SortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortField::Email => a.email().to_lowercase().cmp(&b.email().to_lowercase()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const VALID: &'static str = "asc, desc";

    pub fn parse(raw: &str) -> DomainResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(DomainError::invalid_argument(format!(
                "Invalid sortOrder value '{raw}'. Valid values are: {}",
                Self::VALID
            ))),
        }
    }
}

/// Raw, unvalidated listing parameters as they arrive from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub name_filter: Option<String>,
    pub email_filter: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u64,
    page_size: u64,
    name_filter: Option<String>,
    email_filter: Option<String>,
    sort_by: SortField,
    sort_order: SortOrder,
}

impl ListRequest {
    /// Apply defaults and validate. Runs before any data access.
    pub fn validate(self) -> DomainResult<ListQuery> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(DomainError::invalid_argument(format!(
                "Page must be greater than 0. Received: {page}"
            )));
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(DomainError::invalid_argument(format!(
                "PageSize must be between 1 and {MAX_PAGE_SIZE}. Received: {page_size}"
            )));
        }

        let sort_by = match self.sort_by.as_deref() {
            Some(raw) => SortField::parse(raw)?,
            None => SortField::default(),
        };
        let sort_order = match self.sort_order.as_deref() {
            Some(raw) => SortOrder::parse(raw)?,
            None => SortOrder::default(),
        };

        Ok(ListQuery {
            page: page.unsigned_abs(),
            page_size: page_size.unsigned_abs(),
            name_filter: normalize_filter(self.name_filter),
            email_filter: normalize_filter(self.email_filter),
            sort_by,
            sort_order,
        })
    }
}

fn normalize_filter(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    fn matches(&self, user: &User) -> bool {
        contains_ci(user.name(), self.name_filter.as_deref())
            && contains_ci(user.email(), self.email_filter.as_deref())
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Pagination metadata of a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u64,
    pub page_size: u64,
    pub total_users: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Effective filters, echoed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub name_filter: Option<String>,
    pub email_filter: Option<String>,
}

/// Effective sort, echoed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortEcho {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Listing envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub data: Vec<User>,
    pub pagination: PaginationInfo,
    pub filters: FilterEcho,
    pub sorting: SortEcho,
}

/// Filter, sort and paginate `records` (in insertion order).
///
/// Sorting is stable: records comparing equal keep their insertion order in
/// both directions. A page past the end yields an empty `data`.
pub fn list_users(records: &[User], query: &ListQuery) -> UserPage {
    let mut matching: Vec<&User> = records.iter().filter(|u| query.matches(u)).collect();

    match query.sort_order {
        SortOrder::Asc => matching.sort_by(|a, b| query.sort_by.compare(a, b)),
        SortOrder::Desc => matching.sort_by(|a, b| query.sort_by.compare(b, a)),
    }

    let total = matching.len() as u64;
    let total_pages = total.div_ceil(query.page_size);

    let offset = (query.page - 1).saturating_mul(query.page_size);
    let data = usize::try_from(offset)
        .ok()
        .and_then(|offset| matching.get(offset..))
        .unwrap_or_default()
        .iter()
        .take(query.page_size as usize)
        .map(|u| (*u).clone())
        .collect();

    UserPage {
        data,
        pagination: PaginationInfo {
            current_page: query.page,
            page_size: query.page_size,
            total_users: total,
            total_pages,
            has_previous_page: query.page > 1,
            has_next_page: query.page < total_pages,
        },
        filters: FilterEcho {
            name_filter: query.name_filter.clone(),
            email_filter: query.email_filter.clone(),
        },
        sorting: SortEcho {
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        },
    }
}
