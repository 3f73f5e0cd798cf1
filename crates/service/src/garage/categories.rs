//! Synthetic service categories: the first whitespace-separated token of a
//! service name, counted in process.

use std::collections::HashMap;

use super::domain::CategoryCount;

pub fn category_of(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

/// Group names by category, most frequent first. Categories with equal
/// counts keep the order in which they were first seen.
pub fn categorize<'a, I>(names: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for name in names {
        let category = category_of(name);
        match index.get(category) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(category, counts.len());
                counts.push((category, 1));
            }
        }
    }
    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category: category.to_string(), count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(v: &[CategoryCount]) -> Vec<(&str, u64)> {
        v.iter().map(|c| (c.category.as_str(), c.count)).collect()
    }

    #[test]
    fn groups_by_first_word() {
        let out = categorize(["Oil Change", "Oil Filter", "Brake Pad"]);
        assert_eq!(pairs(&out), vec![("Oil", 2), ("Brake", 1)]);
    }

    #[test]
    fn higher_count_moves_ahead_of_earlier_category() {
        let out = categorize(["Tyre Rotation", "Brake Pad", "Brake Fluid", "Tyre Fitting", "Brake Disc"]);
        assert_eq!(pairs(&out), vec![("Brake", 3), ("Tyre", 2)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let out = categorize(["Wash", "Detailing", "Alignment"]);
        assert_eq!(pairs(&out), vec![("Wash", 1), ("Detailing", 1), ("Alignment", 1)]);
    }

    #[test]
    fn single_word_and_extra_whitespace() {
        assert_eq!(category_of("Diagnostics"), "Diagnostics");
        assert_eq!(category_of("  AC   Recharge "), "AC");
        assert_eq!(category_of(""), "");
    }

    #[test]
    fn empty_input_gives_empty_list() {
        assert!(categorize(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn category_is_case_sensitive() {
        let out = categorize(["oil top-up", "Oil Change"]);
        assert_eq!(pairs(&out), vec![("oil", 1), ("Oil", 1)]);
    }
}
