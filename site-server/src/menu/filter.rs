//! Public Menu Filtering
//!
//! Category and free-text filters for the public menu page. Both filters
//! must pass for an item to be shown.

use crate::db::models::MenuItemWithCategories;

/// Category filter choice. `All` disables category filtering entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    Id(String),
}

impl CategorySelection {
    /// Parse the query-string form: absent, empty, or "All" mean no filter
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            None => CategorySelection::All,
            Some(s) if s.is_empty() || s == "All" => CategorySelection::All,
            Some(s) => CategorySelection::Id(s.to_string()),
        }
    }
}

fn matches_category(item: &MenuItemWithCategories, selection: &CategorySelection) -> bool {
    match selection {
        CategorySelection::All => true,
        CategorySelection::Id(id) => item.has_category(id),
    }
}

/// Case-insensitive substring match on name or description
fn matches_search(item: &MenuItemWithCategories, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    if item.name.to_lowercase().contains(needle_lower) {
        return true;
    }
    item.description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(needle_lower))
}

/// Apply both filters, preserving the input order
pub fn filter_items(
    items: Vec<MenuItemWithCategories>,
    selection: &CategorySelection,
    search: &str,
) -> Vec<MenuItemWithCategories> {
    let needle = search.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches_category(item, selection) && matches_search(item, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_items() -> Vec<MenuItemWithCategories> {
        vec![
            MenuItemWithCategories::for_tests(
                "Masala Chai",
                Some("Spiced tea with milk"),
                Decimal::new(250, 2),
                &["tea"],
            ),
            MenuItemWithCategories::for_tests(
                "Veg Biryani",
                Some("Fragrant rice with vegetables"),
                Decimal::new(1200, 2),
                &["rice"],
            ),
            MenuItemWithCategories::for_tests(
                "Lemon Rice",
                None,
                Decimal::new(800, 2),
                &["rice"],
            ),
        ]
    }

    #[test]
    fn all_selection_keeps_everything() {
        let out = filter_items(sample_items(), &CategorySelection::All, "");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn category_filter_keeps_members_only() {
        let rice = CategorySelection::Id("category:rice".to_string());
        let out = filter_items(sample_items(), &rice, "");
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| i.name.contains("Rice") || i.name.contains("Biryani")));
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let out = filter_items(sample_items(), &CategorySelection::All, "CHAI");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Masala Chai");
    }

    #[test]
    fn search_matches_description() {
        let out = filter_items(sample_items(), &CategorySelection::All, "fragrant");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Veg Biryani");
    }

    #[test]
    fn missing_description_only_matches_on_name() {
        let out = filter_items(sample_items(), &CategorySelection::All, "lemon");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Lemon Rice");
    }

    #[test]
    fn filters_combine_with_and() {
        let rice = CategorySelection::Id("category:rice".to_string());
        let out = filter_items(sample_items(), &rice, "rice");
        // "Veg Biryani" matches via its description, "Lemon Rice" via its name
        assert_eq!(out.len(), 2);

        let out = filter_items(sample_items(), &rice, "chai");
        assert!(out.is_empty());
    }

    #[test]
    fn query_parsing_treats_all_and_empty_as_no_filter() {
        assert_eq!(CategorySelection::from_query(None), CategorySelection::All);
        assert_eq!(CategorySelection::from_query(Some("")), CategorySelection::All);
        assert_eq!(CategorySelection::from_query(Some("All")), CategorySelection::All);
        assert_eq!(
            CategorySelection::from_query(Some("category:tea")),
            CategorySelection::Id("category:tea".to_string())
        );
    }
}
