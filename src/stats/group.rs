//! Grouping & Ranking Module
//! Reusable group-by accumulation and ordering primitives shared by all
//! aggregate statistics, so tie-break semantics stay uniform.

use std::collections::HashMap;
use std::hash::Hash;

/// Accumulated price statistics for one group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStat<K> {
    pub key: K,
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl<K> GroupStat<K> {
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Spread between the largest and smallest observed value.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Group `(key, value)` pairs, accumulating count/sum/min/max per key.
///
/// Groups come back in first-seen order, which is what every tie-break
/// downstream relies on.
pub fn group_stats<K, I>(pairs: I) -> Vec<GroupStat<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut order: Vec<GroupStat<K>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for (key, value) in pairs {
        match index.get(&key) {
            Some(&i) => {
                let stat = &mut order[i];
                stat.count += 1;
                stat.sum += value;
                stat.min = stat.min.min(value);
                stat.max = stat.max.max(value);
            }
            None => {
                index.insert(key.clone(), order.len());
                order.push(GroupStat {
                    key,
                    count: 1,
                    sum: value,
                    min: value,
                    max: value,
                });
            }
        }
    }

    order
}

/// Stable descending sort by the given metric. Groups with equal metric
/// values keep their first-seen relative order, so the first-encountered
/// group wins ties at the top.
pub fn rank_desc<K>(stats: &mut [GroupStat<K>], metric: impl Fn(&GroupStat<K>) -> f64) {
    stats.sort_by(|a, b| {
        metric(b)
            .partial_cmp(&metric(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// The group with the largest metric value; the first-encountered group
/// wins ties. `None` only when `stats` is empty.
pub fn max_by_metric<'a, K>(
    stats: &'a [GroupStat<K>],
    metric: impl Fn(&GroupStat<K>) -> f64,
) -> Option<&'a GroupStat<K>> {
    let mut best: Option<&GroupStat<K>> = None;
    for stat in stats {
        match best {
            None => best = Some(stat),
            Some(current) if metric(stat) > metric(current) => best = Some(stat),
            Some(_) => {}
        }
    }
    best
}

/// The group with the smallest metric value; the first-encountered group
/// wins ties. `None` only when `stats` is empty.
pub fn min_by_metric<'a, K>(
    stats: &'a [GroupStat<K>],
    metric: impl Fn(&GroupStat<K>) -> f64,
) -> Option<&'a GroupStat<K>> {
    let mut best: Option<&GroupStat<K>> = None;
    for stat in stats {
        match best {
            None => best = Some(stat),
            Some(current) if metric(stat) < metric(current) => best = Some(stat),
            Some(_) => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_count_sum_min_max_per_key() {
        let stats = group_stats(vec![
            ("bmw", 1000.0),
            ("audi", 2000.0),
            ("bmw", 3000.0),
        ]);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].key, "bmw");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].mean(), 2000.0);
        assert_eq!(stats[0].min, 1000.0);
        assert_eq!(stats[0].max, 3000.0);
        assert_eq!(stats[0].span(), 2000.0);
        assert_eq!(stats[1].key, "audi");
        assert_eq!(stats[1].mean(), 2000.0);
    }

    #[test]
    fn groups_come_back_in_first_seen_order() {
        let stats = group_stats(vec![("c", 1.0), ("a", 1.0), ("b", 1.0), ("a", 1.0)]);
        let keys: Vec<_> = stats.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn rank_desc_keeps_first_seen_order_on_ties() {
        let mut stats = group_stats(vec![("bmw", 2000.0), ("audi", 2000.0), ("vw", 3000.0)]);
        rank_desc(&mut stats, GroupStat::mean);
        let keys: Vec<_> = stats.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["vw", "bmw", "audi"]);
    }

    #[test]
    fn max_by_metric_prefers_first_seen_on_ties() {
        let stats = group_stats(vec![("bmw", 2000.0), ("audi", 2000.0)]);
        let highest = max_by_metric(&stats, GroupStat::mean).unwrap();
        assert_eq!(highest.key, "bmw");
    }

    #[test]
    fn min_by_metric_prefers_first_seen_on_ties() {
        let stats = group_stats(vec![("bmw", 2000.0), ("audi", 2000.0)]);
        let lowest = min_by_metric(&stats, GroupStat::mean).unwrap();
        assert_eq!(lowest.key, "bmw");
    }

    #[test]
    fn min_by_metric_on_empty_is_none() {
        let stats: Vec<GroupStat<&str>> = Vec::new();
        assert!(min_by_metric(&stats, GroupStat::mean).is_none());
    }
}
