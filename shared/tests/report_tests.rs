//! Report calculation tests
//!
//! Covers shrinkage, tour statistics, the top-seller ranking and sold-count
//! reconciliation over hand-built inventory snapshots.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{
    InventoryRecord, MerchItemRef, Show, ShowRef, Tour, TourWithShows, VariantRef,
};
use shared::reports::{
    build_tour_report, calculate_shrinkage, reconcile_sold_count, top_selling_items, tour_stats,
    TOP_SELLERS_LIMIT,
};
use uuid::Uuid;

// ============================================================================
// Builders
// ============================================================================

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
}

fn item(name: &str) -> MerchItemRef {
    MerchItemRef {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

fn variant(item: &MerchItemRef, variant_type: Option<&str>, size: &str, price: Decimal) -> VariantRef {
    VariantRef {
        id: Uuid::new_v4(),
        size: size.to_string(),
        variant_type: variant_type.map(str::to_string),
        price,
        quantity: 50,
        merch_item: item.clone(),
    }
}

fn show(name: &str, day: u32) -> ShowRef {
    ShowRef {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date: date(day),
        venue: format!("{} Hall", name),
    }
}

fn record(
    variant: &VariantRef,
    show: &ShowRef,
    start_count: Option<i32>,
    end_count: Option<i32>,
    sold_count: Option<i32>,
) -> InventoryRecord {
    InventoryRecord {
        id: Uuid::new_v4(),
        show_id: show.id,
        variant_id: variant.id,
        start_count,
        end_count,
        added_count: 0,
        sold_count,
        show: show.clone(),
        variant: variant.clone(),
    }
}

fn tour_with(show_count: u32) -> TourWithShows {
    let tour_id = Uuid::new_v4();
    let now = Utc::now();
    TourWithShows {
        tour: Tour {
            id: tour_id,
            name: "Autumn Run".to_string(),
            start_date: date(1),
            end_date: date(30),
            created_at: now,
            updated_at: now,
        },
        shows: (1..=show_count)
            .map(|day| Show {
                id: Uuid::new_v4(),
                tour_id,
                name: format!("Night {}", day),
                venue: "Club".to_string(),
                date: date(day),
                created_at: now,
            })
            .collect(),
    }
}

// ============================================================================
// Shrinkage
// ============================================================================

#[cfg(test)]
mod shrinkage_tests {
    use super::*;

    #[test]
    fn test_three_show_chain() {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let (d1, d2, d3) = (show("One", 1), show("Two", 2), show("Three", 3));
        let records = vec![
            record(&v, &d1, Some(12), Some(10), Some(2)),
            record(&v, &d2, Some(8), Some(6), Some(2)),
            record(&v, &d3, Some(4), Some(2), Some(2)),
        ];

        let items = calculate_shrinkage(&records);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].shrinkage, 2);
        assert_eq!(items[1].shrinkage, 2);
        let total: i32 = items.iter().map(|i| i.shrinkage).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_gain_is_not_reported() {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let records = vec![
            record(&v, &show("One", 1), Some(9), Some(5), Some(4)),
            record(&v, &show("Two", 2), Some(7), Some(3), Some(4)),
        ];
        assert!(calculate_shrinkage(&records).is_empty());
    }

    #[test]
    fn test_equal_counts_emit_nothing() {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let records = vec![
            record(&v, &show("One", 1), Some(9), Some(5), Some(4)),
            record(&v, &show("Two", 2), Some(5), Some(3), Some(2)),
        ];
        assert!(calculate_shrinkage(&records).is_empty());
    }

    #[test]
    fn test_london_paris_berlin() {
        let hoodie = item("Hoodie");
        let v = variant(&hoodie, Some("Unisex"), "L", Decimal::new(5500, 2));
        let london = show("London", 10);
        let paris = show("Paris", 12);
        let berlin = show("Berlin", 14);
        // deliberately out of date order
        let records = vec![
            record(&v, &berlin, Some(15), Some(11), Some(4)),
            record(&v, &london, Some(30), Some(24), Some(6)),
            record(&v, &paris, Some(22), Some(17), Some(5)),
        ];

        let items = calculate_shrinkage(&records);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].prev_show, "London");
        assert_eq!(items[0].current_show, "Paris");
        assert_eq!(items[0].end_count, 24);
        assert_eq!(items[0].start_count, 22);
        assert_eq!(items[0].shrinkage, 2);
        assert_eq!(items[0].value, Decimal::new(11000, 2));

        assert_eq!(items[1].prev_show, "Paris");
        assert_eq!(items[1].current_show, "Berlin");
        assert_eq!(items[1].shrinkage, 2);
        assert_eq!(items[1].item, "Hoodie");
        assert_eq!(items[1].variant, "Unisex L");
    }

    #[test]
    fn test_variants_are_tracked_independently() {
        let tee = item("T-Shirt");
        let small = variant(&tee, None, "S", Decimal::from(20));
        let large = variant(&tee, None, "L", Decimal::from(20));
        let one = show("One", 1);
        let two = show("Two", 2);
        let records = vec![
            record(&small, &one, Some(10), Some(8), Some(2)),
            record(&large, &one, Some(10), Some(9), Some(1)),
            record(&small, &two, Some(5), Some(5), Some(0)),
            record(&large, &two, Some(9), Some(9), Some(0)),
        ];

        let items = calculate_shrinkage(&records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].variant_id, small.id);
        assert_eq!(items[0].shrinkage, 3);
        assert_eq!(items[0].value, Decimal::from(60));
    }

    #[test]
    fn test_empty_input() {
        assert!(calculate_shrinkage(&[]).is_empty());
    }
}

// ============================================================================
// Tour statistics
// ============================================================================

#[cfg(test)]
mod stats_tests {
    use super::*;

    #[test]
    fn test_missing_tour_gives_zero_average() {
        let cap = item("Cap");
        let v = variant(&cap, None, "One Size", Decimal::from(30));
        let records = vec![record(&v, &show("One", 1), Some(10), Some(4), Some(6))];

        let stats = tour_stats(&records, None, &[]);
        assert_eq!(stats.total_sold, 6);
        assert_eq!(stats.total_revenue, Decimal::from(180));
        assert_eq!(stats.avg_per_show, Decimal::ZERO);
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let tour = tour_with(3);
        let stats = tour_stats(&[], Some(&tour), &[]);
        assert_eq!(stats.total_sold, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.total_shrinkage, 0);
        assert_eq!(stats.total_shrinkage_value, Decimal::ZERO);
        assert_eq!(stats.avg_per_show, Decimal::ZERO);
    }

    #[test]
    fn test_tour_without_shows() {
        let tour = tour_with(0);
        let cap = item("Cap");
        let v = variant(&cap, None, "One Size", Decimal::from(30));
        let records = vec![record(&v, &show("One", 1), Some(10), Some(9), Some(1))];
        assert_eq!(tour_stats(&records, Some(&tour), &[]).avg_per_show, Decimal::ZERO);
    }

    #[test]
    fn test_totals_include_shrinkage() {
        let tour = tour_with(2);
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let (one, two) = (show("One", 1), show("Two", 2));
        let records = vec![
            record(&v, &one, Some(20), Some(14), Some(6)),
            record(&v, &two, Some(12), Some(10), Some(2)),
        ];
        let shrinkage = calculate_shrinkage(&records);
        let stats = tour_stats(&records, Some(&tour), &shrinkage);

        assert_eq!(stats.total_sold, 8);
        assert_eq!(stats.total_revenue, Decimal::from(200));
        assert_eq!(stats.total_shrinkage, 2);
        assert_eq!(stats.total_shrinkage_value, Decimal::from(50));
        assert_eq!(stats.avg_per_show, Decimal::from(100));
    }
}

// ============================================================================
// Top sellers
// ============================================================================

#[cfg(test)]
mod top_seller_tests {
    use super::*;

    #[test]
    fn test_zero_sold_contributes_nothing() {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let one = show("One", 1);
        let records = vec![
            record(&v, &one, Some(10), Some(10), Some(0)),
            record(&v, &show("Two", 2), Some(10), Some(7), Some(3)),
        ];

        let items = top_selling_items(&records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total_sold, 3);
        assert_eq!(items[0].variants.len(), 1);
    }

    #[test]
    fn test_untyped_and_typed_same_size_are_separate() {
        let tee = item("T-Shirt");
        let plain = variant(&tee, None, "M", Decimal::from(25));
        let mens = variant(&tee, Some("Mens"), "M", Decimal::from(25));
        let literal_null = variant(&tee, Some("null"), "M", Decimal::from(25));
        let one = show("One", 1);
        let records = vec![
            record(&plain, &one, None, None, Some(4)),
            record(&mens, &one, None, None, Some(2)),
            record(&literal_null, &one, None, None, Some(1)),
        ];

        let items = top_selling_items(&records);
        assert_eq!(items.len(), 1);
        let variants = &items[0].variants;
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].variant_type, None);
        assert_eq!(variants[0].sold, 4);
        assert_eq!(variants[1].variant_type.as_deref(), Some("Mens"));
        assert_eq!(variants[2].variant_type.as_deref(), Some("null"));
    }

    #[test]
    fn test_ranked_and_capped() {
        let one = show("One", 1);
        let records: Vec<InventoryRecord> = (1..=12)
            .map(|n| {
                let it = item(&format!("Item {}", n));
                let v = variant(&it, None, "OS", Decimal::from(10));
                record(&v, &one, None, None, Some(n))
            })
            .collect();

        let items = top_selling_items(&records);
        assert_eq!(items.len(), TOP_SELLERS_LIMIT);
        assert_eq!(items[0].name, "Item 12");
        assert_eq!(items[0].total_revenue, Decimal::from(120));
        assert_eq!(items[7].name, "Item 5");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let one = show("One", 1);
        let first = item("Poster");
        let second = item("Sticker");
        let records = vec![
            record(&variant(&first, None, "A2", Decimal::from(15)), &one, None, None, Some(3)),
            record(&variant(&second, None, "OS", Decimal::from(2)), &one, None, None, Some(3)),
        ];
        let items = top_selling_items(&records);
        assert_eq!(items[0].name, "Poster");
        assert_eq!(items[1].name, "Sticker");
    }
}

// ============================================================================
// Reconciliation and combined report
// ============================================================================

#[cfg(test)]
mod reconcile_tests {
    use super::*;

    #[test]
    fn test_backfill_then_noop() {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let mut r = record(&v, &show("One", 1), Some(30), Some(24), None);

        assert_eq!(reconcile_sold_count(&mut r), Some(6));
        assert_eq!(r.sold_count, Some(6));
        assert_eq!(reconcile_sold_count(&mut r), None);
        assert_eq!(r.sold_count, Some(6));
    }

    #[test]
    fn test_uncounted_record_untouched() {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let mut r = record(&v, &show("One", 1), Some(30), None, None);
        assert_eq!(reconcile_sold_count(&mut r), None);
        assert_eq!(r.sold_count, None);
    }

    #[test]
    fn test_build_tour_report() {
        let tour = tour_with(2);
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(25));
        let records = vec![
            record(&v, &show("One", 1), Some(20), Some(14), Some(6)),
            record(&v, &show("Two", 2), Some(12), None, None),
        ];

        let report = build_tour_report(&records, Some(&tour));
        assert_eq!(report.shrinkage.len(), 1);
        assert_eq!(report.stats.total_shrinkage, 2);
        assert_eq!(report.stats.total_sold, 6);
        assert_eq!(report.top_sellers.len(), 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// (start, end) counts for one show; end may be missing
    fn counts_strategy() -> impl Strategy<Value = (Option<i32>, Option<i32>)> {
        (
            prop::option::weighted(0.9, 0..200i32),
            prop::option::weighted(0.8, 0..200i32),
        )
    }

    fn chain(counts: &[(Option<i32>, Option<i32>)]) -> Vec<InventoryRecord> {
        let tee = item("T-Shirt");
        let v = variant(&tee, None, "M", Decimal::from(20));
        counts
            .iter()
            .enumerate()
            .map(|(i, (start, end))| {
                let sold = match (start, end) {
                    (Some(s), Some(e)) => Some(s - e),
                    _ => None,
                };
                record(&v, &show(&format!("S{}", i), i as u32 + 1), *start, *end, sold)
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every emitted item is a strict loss valued at the variant price
        #[test]
        fn prop_shrinkage_only_positive(counts in prop::collection::vec(counts_strategy(), 0..20)) {
            let records = chain(&counts);
            let items = calculate_shrinkage(&records);

            prop_assert!(items.len() <= records.len().saturating_sub(1));
            for i in &items {
                prop_assert!(i.shrinkage > 0);
                prop_assert_eq!(i.shrinkage, i.end_count - i.start_count);
                prop_assert_eq!(i.value, Decimal::from(i.shrinkage) * Decimal::from(20));
            }
        }

        /// Fewer than two records never yields shrinkage
        #[test]
        fn prop_single_record_no_shrinkage(counts in counts_strategy()) {
            let records = chain(&[counts]);
            prop_assert!(calculate_shrinkage(&records).is_empty());
        }

        /// Average per show is total revenue over show count, zero without shows
        #[test]
        fn prop_avg_per_show(
            counts in prop::collection::vec(counts_strategy(), 0..10),
            show_count in 0u32..6
        ) {
            let records = chain(&counts);
            let tour = tour_with(show_count);
            let stats = tour_stats(&records, Some(&tour), &[]);

            if show_count == 0 {
                prop_assert_eq!(stats.avg_per_show, Decimal::ZERO);
            } else {
                prop_assert_eq!(stats.avg_per_show, stats.total_revenue / Decimal::from(show_count));
            }
        }

        /// Top sellers never exceed the cap and are sorted by units
        #[test]
        fn prop_top_sellers_sorted_and_capped(
            sales in prop::collection::vec(prop::option::of(-5..50i32), 0..30)
        ) {
            let one = show("One", 1);
            let records: Vec<InventoryRecord> = sales
                .iter()
                .enumerate()
                .map(|(n, sold)| {
                    let it = item(&format!("Item {}", n % 11));
                    let v = variant(&it, None, "OS", Decimal::from(5));
                    record(&v, &one, None, None, *sold)
                })
                .collect();

            let items = top_selling_items(&records);
            prop_assert!(items.len() <= TOP_SELLERS_LIMIT);
            for pair in items.windows(2) {
                prop_assert!(pair[0].total_sold >= pair[1].total_sold);
            }
            for i in &items {
                prop_assert!(i.total_sold > 0);
                let by_variant: i64 = i.variants.iter().map(|v| v.sold).sum();
                prop_assert_eq!(by_variant, i.total_sold);
            }
        }
    }
}
