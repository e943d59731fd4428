//! Engine-level behaviour across the variant registry.
//!
//! Tests cover:
//! - Chain priority and short-circuiting
//! - Per-variant tech and non-tech branch outcomes
//! - Missing-data fallbacks
//! - Determinism and the equal-weight invariant
//! - Performance-history isolation between variants

mod common;

use common::*;
use klm_engine::domain::chain::KlmVariant;
use klm_engine::domain::selection::{select_bottom, select_top, Candidate};

fn cands(pairs: &[(&str, f64)]) -> Vec<Candidate> {
    pairs.iter().map(|&p| Candidate::from(p)).collect()
}

mod chain_priority {
    use super::*;

    #[test]
    fn earlier_overbought_symbol_wins() {
        let snap = rsi10(&[("QQQE", 85.0), ("SPY", 85.0)]);
        for id in VariantId::ALL {
            let d = Variant::new(id).evaluate(&snap);
            assert_eq!(d.action, Action::Buy);
            assert!(d.reasoning.contains("QQQE"), "{id}: {}", d.reasoning);
            assert!(!d.reasoning.contains("SPY"), "{id}: {}", d.reasoning);
        }
    }

    #[test]
    fn overbought_buys_uvxy_except_nova() {
        let snap = rsi10(&[("QQQE", 85.0), ("SPY", 85.0)]);
        assert_eq!(symbol(&Variant::new(VariantId::Original).evaluate(&snap)), "UVXY");
        assert_eq!(symbol(&Variant::new(VariantId::V1280_26).evaluate(&snap)), "UVXY");
        assert_eq!(symbol(&Variant::new(VariantId::Nova).evaluate(&snap)), "UVIX");
    }

    #[test]
    fn overbought_beats_oversold() {
        let snap = rsi10(&[("XLP", 76.0), ("SOXL", 10.0)]);
        let d = Variant::new(VariantId::V506_38).evaluate(&snap);
        assert_eq!(symbol(&d), "UVXY");
        assert!(d.reasoning.contains("XLP"));
    }

    #[test]
    fn pop_bot_short_circuits_core_switcher() {
        let snap = rsi10(&[("TQQQ", 78.9), ("SOXL", 29.0), ("XLK", 70.0), ("KMLM", 20.0)])
            .with("UVXY", IndicatorField::Rsi21, 50.0);
        let d = Variant::new(VariantId::Original).evaluate(&snap);
        assert_eq!(symbol(&d), "SOXL");
        assert!(d.reasoning.starts_with("Pop bot"));
        assert!(!d.reasoning.contains("KMLM switcher"));
    }

    #[test]
    fn popped_hedge_routes_to_bsc() {
        let snap = quiet_market()
            .with("UVXY", IndicatorField::Rsi21, 72.0)
            .with("SPY", IndicatorField::Rsi21, 25.0);
        assert_eq!(symbol(&Variant::new(VariantId::V506_38).evaluate(&snap)), "SPXL");
        // 1280/26 never reads the hedge symbol
        assert_ne!(symbol(&Variant::new(VariantId::V1280_26).evaluate(&snap)), "SPXL");
    }
}

mod variant_table {
    use super::*;

    #[test]
    fn tech_branch_outcomes() {
        let snap = tech_market();
        let expect = |id: VariantId, target: Target| {
            assert_eq!(Variant::new(id).evaluate(&snap).target, target, "{id}");
        };
        let single = |s: &str| Target::Symbol(s.to_string());
        let pair = Target::equal_weight(&["SOXL", "SVIX"]).unwrap();

        expect(VariantId::Original, single("SOXL"));
        expect(VariantId::V506_38, single("SOXL"));
        expect(VariantId::V410_38, pair.clone());
        expect(VariantId::V520_22, single("TECL"));
        expect(VariantId::V830_21, single("SOXL"));
        expect(VariantId::V1200_28, pair);
        expect(VariantId::V1280_26, single("FNGU"));
        expect(VariantId::Nova, single("NVDA"));
    }

    #[test]
    fn non_tech_branch_outcomes() {
        let snap = defensive_market();
        let expected = [
            (VariantId::Original, "UUP"),
            (VariantId::V506_38, "UUP"),
            (VariantId::V410_38, "SQQQ"),
            (VariantId::V520_22, "SQQQ"),
            (VariantId::V830_21, "TZA"),
            (VariantId::V1200_28, "UUP"),
            (VariantId::V1280_26, "UUP"),
            (VariantId::Nova, "UUP"),
        ];
        for (id, want) in expected {
            let d = Variant::new(id).evaluate(&snap);
            assert_eq!(symbol(&d), want, "{id}: {}", d.reasoning);
            assert!(d.reasoning.starts_with("KMLM switcher"), "{id}");
        }
    }

    #[test]
    fn sso_only_in_extended_rotators() {
        let snap = defensive_market().with("SSO", IndicatorField::StdevReturn6, 0.05);
        assert_eq!(symbol(&Variant::new(VariantId::V506_38).evaluate(&snap)), "SSO");
        assert_eq!(symbol(&Variant::new(VariantId::V1200_28).evaluate(&snap)), "SSO");
        assert_eq!(symbol(&Variant::new(VariantId::Original).evaluate(&snap)), "UUP");
        assert_eq!(symbol(&Variant::new(VariantId::V1280_26).evaluate(&snap)), "UUP");
    }

    #[test]
    fn bond_check_positive_branch() {
        let snap = defensive_market()
            .with("BND", IndicatorField::MovingAverageReturn20, 0.002)
            .with("SPLV", IndicatorField::Rsi10, 39.0);
        // KMLM RSI(10) 57 vs SPLV 39: lowest wins
        assert_eq!(symbol(&Variant::new(VariantId::V830_21).evaluate(&snap)), "SPLV");
    }

    #[test]
    fn labu_only_for_original_and_1200_28() {
        let snap = quiet_market().with("LABU", IndicatorField::Rsi10, 20.0);
        for id in VariantId::ALL {
            let d = Variant::new(id).evaluate(&snap);
            let fired = symbol(&d) == "LABU";
            let expected = matches!(id, VariantId::Original | VariantId::V1200_28);
            assert_eq!(fired, expected, "{id}");
        }
    }

    #[test]
    fn registry_matches_trait_names() {
        for id in VariantId::ALL {
            let strategy: &dyn KlmVariant = id.strategy();
            assert_eq!(strategy.name(), id.name());
        }
    }
}

mod missing_data {
    use super::*;

    #[test]
    fn empty_snapshot_yields_fallbacks() {
        let snap = IndicatorSnapshot::new();
        let expected = [
            (VariantId::Original, "KMLM"),
            (VariantId::V506_38, "KMLM"),
            (VariantId::V410_38, "TLT"),
            (VariantId::V520_22, "TLT"),
            (VariantId::V830_21, "TLT"),
            (VariantId::V1200_28, "KMLM"),
            (VariantId::V1280_26, "KMLM"),
            (VariantId::Nova, "KMLM"),
        ];
        for (id, want) in expected {
            let d = Variant::new(id).evaluate(&snap);
            assert_eq!(symbol(&d), want, "{id}");
            assert_eq!(d.action, Action::Buy);
        }
    }

    #[test]
    fn no_xlk_or_kmlm_routes_to_non_tech() {
        let snap = quiet_market()
            .with("UUP", IndicatorField::StdevReturn6, 0.9)
            .with("FTLS", IndicatorField::StdevReturn6, 0.3)
            .with("TECL", IndicatorField::Rsi10, 35.0);
        let d = Variant::new(VariantId::Original).evaluate(&snap);
        assert_eq!(symbol(&d), "FTLS");
        assert!(d.reasoning.contains("unavailable"));
    }

    #[test]
    fn absent_overbought_symbols_do_not_trigger() {
        let snap = rsi10(&[("SPY", 79.0)]);
        assert_ne!(symbol(&Variant::new(VariantId::Original).evaluate(&snap)), "UVXY");
    }
}

mod selection {
    use super::*;

    #[test]
    fn bottom_and_top() {
        let input = cands(&[("A", 3.0), ("B", 1.0), ("C", 2.0)]);
        assert_eq!(select_bottom(&input, 2), cands(&[("B", 1.0), ("C", 2.0)]));
        assert_eq!(select_top(&input, 1), cands(&[("A", 3.0)]));
    }

    #[test]
    fn tie_break() {
        let input = cands(&[("B", 1.0), ("A", 1.0)]);
        assert_eq!(select_bottom(&input, 1), cands(&[("A", 1.0)]));
    }
}

mod invariants {
    use super::*;

    #[test]
    fn repeated_evaluation_is_identical() {
        for snap in [quiet_market(), tech_market(), defensive_market()] {
            for id in VariantId::ALL {
                let v = Variant::new(id);
                let first = v.evaluate(&snap);
                for _ in 0..5 {
                    assert_eq!(v.evaluate(&snap), first, "{id}");
                }
            }
        }
    }

    #[test]
    fn allocations_are_equal_weight() {
        for id in [VariantId::V410_38, VariantId::V1200_28] {
            let d = Variant::new(id).evaluate(&tech_market());
            let weights = d.target.as_allocation().expect("allocation");
            let n = weights.len() as f64;
            for w in weights.values() {
                assert!(*w > 0.0);
                assert!((w - 1.0 / n).abs() < 1e-12);
            }
            let sum: f64 = weights.values().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn concurrent_evaluation_on_one_instance() {
        let variant = Variant::new(VariantId::V1200_28);
        let snap = tech_market();
        let expected = variant.evaluate(&snap);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        assert_eq!(variant.evaluate(&snap), expected);
                    }
                });
            }
        });
    }
}

mod performance {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn window_of_five() {
        let v = Variant::new(VariantId::Original);
        for r in [0.01, -0.02, 0.015, 0.0] {
            v.update_performance(r);
        }
        assert_eq!(v.performance_metric(5), 0.0);
        v.update_performance(0.005);

        let values = [0.01, -0.02, 0.015, 0.0, 0.005];
        let mean = values.iter().sum::<f64>() / 5.0;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 5.0;
        assert_relative_eq!(v.performance_metric(5), var.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn variants_are_isolated() {
        let a = Variant::new(VariantId::V506_38);
        let b = Variant::new(VariantId::V506_38);
        for r in [0.1, 0.2, 0.3, 0.4, 0.5] {
            a.update_performance(r);
        }
        assert!(a.performance_metric(5) > 0.0);
        assert_eq!(b.performance_metric(5), 0.0);
        assert_eq!(b.history_len(), 0);
    }

    #[test]
    fn concurrent_updates_are_serialized() {
        let v = Variant::new(VariantId::Nova);
        std::thread::scope(|scope| {
            for t in 0..4 {
                let v = &v;
                scope.spawn(move || {
                    for i in 0..20 {
                        v.update_performance((t * 20 + i) as f64);
                    }
                });
            }
        });
        assert_eq!(v.history_len(), 80);
    }

    #[test]
    fn evaluation_leaves_history_alone() {
        let v = Variant::new(VariantId::V830_21);
        v.update_performance(0.3);
        v.evaluate(&defensive_market());
        assert_eq!(v.history_len(), 1);
    }
}
