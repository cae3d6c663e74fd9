//! # Catalog Query Descriptors
//!
//! A closed, composable set of filter/sort descriptors for catalog reads.
//!
//! ## Why Descriptors Instead of SQL Strings?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw request input            This module             stockroom-db      │
//! │  ───────────────────          ───────────             ────────────      │
//! │                                                                         │
//! │  category="Electronics" ───►  Some("Electronics")  ─► AND category=?   │
//! │  category="All" / ""    ───►  None                 ─► (no filter)      │
//! │                                                                         │
//! │  search="pen"           ───►  Some("pen")          ─► AND name LIKE    │
//! │                                                        '%'||?||'%'     │
//! │                                                                         │
//! │  sort_by="price"        ───►  SortKey::Price       ─► ORDER BY          │
//! │  sort_by="DROP TABLE"   ───►  SortKey::Name        ─►   <fixed text>   │
//! │                                                                         │
//! │  Every ORDER BY fragment is a compile-time constant chosen by enum     │
//! │  variant, so no request field can ever reach the query text.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Sort Key
// =============================================================================

/// The allow-list of catalog sort keys.
///
/// Anything outside the list silently falls back to [`SortKey::Name`].
/// That defensive default is deliberate and load-bearing: it is what keeps
/// unvalidated `sort_by` input from steering the query, and it must not be
/// replaced with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Price,
    Quantity,
    Category,
}

impl SortKey {
    /// Parses a raw `sort_by` field, falling back to `Name`.
    pub fn parse(input: &str) -> SortKey {
        match input.trim() {
            "price" => SortKey::Price,
            "quantity" => SortKey::Quantity,
            "category" => SortKey::Category,
            // "name", "", and anything unexpected
            _ => SortKey::Name,
        }
    }

    /// Returns the fixed ORDER BY fragment for this key.
    ///
    /// Single sort key, ascending; ties retain storage order.
    pub const fn order_by(self) -> &'static str {
        match self {
            SortKey::Name => "name ASC",
            SortKey::Price => "price_cents ASC",
            SortKey::Quantity => "quantity ASC",
            SortKey::Category => "category ASC",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Name
    }
}

// =============================================================================
// Item Query
// =============================================================================

/// A normalized catalog read: optional filters plus a sort key.
///
/// Construct via [`ItemQuery::from_raw`] so the sentinel and trimming
/// rules are applied exactly once, at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    /// Exact-match category filter. `None` means no filter.
    pub category: Option<String>,

    /// Substring match on the item name. `None` means no filter.
    pub search: Option<String>,

    /// Sort key, already defaulted.
    pub sort: SortKey,
}

impl ItemQuery {
    /// Normalizes raw request fields into a query descriptor.
    ///
    /// ## Rules
    /// - category: trimmed; `"All"` or empty means no filter
    /// - search: trimmed; empty means no filter; matched as a substring
    /// - sort: allow-list parse with the name fallback
    pub fn from_raw(category: Option<&str>, search: Option<&str>, sort_by: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "All")
            .map(str::to_string);

        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sort = SortKey::parse(sort_by.unwrap_or(""));

        ItemQuery {
            category,
            search,
            sort,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_allow_list() {
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("price"), SortKey::Price);
        assert_eq!(SortKey::parse("quantity"), SortKey::Quantity);
        assert_eq!(SortKey::parse("category"), SortKey::Category);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_name() {
        assert_eq!(SortKey::parse(""), SortKey::Name);
        assert_eq!(SortKey::parse("price; DROP TABLE items"), SortKey::Name);
        assert_eq!(SortKey::parse("PRICE"), SortKey::Name);
        assert_eq!(SortKey::parse("rowid"), SortKey::Name);

        // The fallback behaves identically to an explicit name sort
        assert_eq!(SortKey::parse("bogus").order_by(), SortKey::Name.order_by());
    }

    #[test]
    fn test_order_by_fragments_are_fixed() {
        assert_eq!(SortKey::Price.order_by(), "price_cents ASC");
        assert_eq!(SortKey::Name.order_by(), "name ASC");
    }

    #[test]
    fn test_category_sentinel() {
        let q = ItemQuery::from_raw(Some("All"), None, None);
        assert_eq!(q.category, None);

        let q = ItemQuery::from_raw(Some("  "), None, None);
        assert_eq!(q.category, None);

        let q = ItemQuery::from_raw(Some("Electronics"), None, None);
        assert_eq!(q.category.as_deref(), Some("Electronics"));
    }

    #[test]
    fn test_search_trimming() {
        let q = ItemQuery::from_raw(None, Some("  pen "), None);
        assert_eq!(q.search.as_deref(), Some("pen"));

        let q = ItemQuery::from_raw(None, Some("   "), None);
        assert_eq!(q.search, None);
    }

    #[test]
    fn test_default_query_is_unfiltered_name_sort() {
        let q = ItemQuery::from_raw(None, None, None);
        assert_eq!(q, ItemQuery::default());
        assert_eq!(q.sort, SortKey::Name);
    }
}
