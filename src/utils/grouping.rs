use std::{collections::HashMap, hash::Hash};

/// Groups items by key, keeping groups in first-seen order and items in input
/// order within each group.
pub fn group_in_order<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    let mut lookup: HashMap<K, usize> = HashMap::new();
    for item in items {
        let k = key(&item);
        match lookup.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                lookup.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_first_seen_order() {
        let items = vec![("chr2", 1), ("chr1", 2), ("chr2", 3), ("chr10", 4), ("chr1", 5)];
        let groups = group_in_order(items, |&(chrom, _)| chrom);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["chr2", "chr1", "chr10"]);
        assert_eq!(groups[0].1, vec![("chr2", 1), ("chr2", 3)]);
        assert_eq!(groups[1].1, vec![("chr1", 2), ("chr1", 5)]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let groups = group_in_order(Vec::<u32>::new(), |&x| x);
        assert!(groups.is_empty());
    }
}
