use routine_model::CatalogItem;

/// Returns the items of `catalog` matching both filters, in catalog order.
///
/// An empty `category` matches every category; otherwise it must equal
/// the item's category exactly. An empty (or blank) `search_term`
/// matches everything; otherwise the item's name, brand, category or
/// description must contain it, ignoring case.
pub fn filter<'a>(
    catalog: &'a [CatalogItem],
    category: &str,
    search_term: &str,
) -> Vec<&'a CatalogItem> {
    let search_term = search_term.trim().to_lowercase();
    catalog
        .iter()
        .filter(|item| category.is_empty() || item.category == category)
        .filter(|item| {
            search_term.is_empty() || matches_term(item, &search_term)
        })
        .collect()
}

fn matches_term(item: &CatalogItem, term: &str) -> bool {
    [&item.name, &item.brand, &item.category, &item.description]
        .into_iter()
        .any(|field| field.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, brand: &str, name: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_owned(),
            brand: brand.to_owned(),
            category: category.to_owned(),
            description: format!("{name} by {brand}"),
            image: String::new(),
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item(1, "CeraVe", "Foaming Cleanser", "cleanser"),
            item(2, "La Roche-Posay", "Toleriane Moisturizer", "skincare"),
            item(3, "Maybelline", "Lash Sensational Mascara", "makeup"),
            item(4, "Garnier", "Micellar Water", "skincare"),
            item(5, "Kerastase", "Nutritive Shampoo", "haircare"),
        ]
    }

    fn ids(items: &[&CatalogItem]) -> Vec<u64> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_no_filters_keeps_catalog() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "", "")), [1, 2, 3, 4, 5]);
        assert_eq!(ids(&filter(&catalog, "", "   ")), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_category_only() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "skincare", "")), [2, 4]);
        assert!(filter(&catalog, "fragrance", "").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "", "MASCARA")), [3]);
        // Matches the brand.
        assert_eq!(ids(&filter(&catalog, "", "garnier")), [4]);
        // Matches the category.
        assert_eq!(ids(&filter(&catalog, "", "hairCARE")), [5]);
    }

    #[test]
    fn test_filters_compose() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "skincare", "water")), [4]);
        assert!(filter(&catalog, "makeup", "water").is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter(&[], "skincare", "serum").is_empty());
    }
}
