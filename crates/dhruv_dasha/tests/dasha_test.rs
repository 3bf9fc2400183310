//! Integration tests for dasha tree generation and queries.
//!
//! These exercise the public API end to end from sidereal longitudes.

use chrono::{DateTime, FixedOffset};
use dhruv_dasha::dasha::{
    ALL_DASHA_SYSTEMS, DAYS_PER_YEAR, DashaCache, DashaEngine, DashaEntity, DashaOptions,
    DashaSystem, DatePrecision, Direction, NakshatraPathTable, PathDirection, PeriodNode,
    RashiSubPeriodMethod, balance_of_first_period, chara, dasha_tree, duration_for_sign,
    kaal_chakra_tree, locate, locate_chain, pada_birth_balance, render_tree, resolve_lord,
    vimshottari_tree,
};
use dhruv_dasha::nakshatra::PADA_SPAN;
use dhruv_dasha::{DashaError, Graha, NatalSnapshot, PlanetaryPosition, Rashi};
use std::sync::Arc;

fn birth() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("1988-11-23T14:05:00+05:30").unwrap()
}

fn chart(asc_lon: f64, lons: [f64; 9]) -> NatalSnapshot {
    NatalSnapshot::from_longitudes(birth(), asc_lon, lons).unwrap()
}

/// Deterministic spread of charts covering every ascendant sign.
fn sample_charts() -> Vec<NatalSnapshot> {
    (0..60u32)
        .map(|k| {
            let k = f64::from(k);
            let asc = (k * 31.7 + 3.3) % 360.0;
            let mut lons = [0.0; 9];
            for (i, lon) in lons.iter_mut().enumerate() {
                *lon = (k * 47.9 + i as f64 * 53.3 + 11.1) % 360.0;
            }
            chart(asc, lons)
        })
        .collect()
}

fn chart_from_positions(asc: (Rashi, f64), grahas: [(Rashi, f64); 9]) -> NatalSnapshot {
    let ascendant = PlanetaryPosition::new(asc.0, asc.1).unwrap();
    let mut positions = [ascendant; 9];
    for (slot, (r, d)) in positions.iter_mut().zip(grahas) {
        *slot = PlanetaryPosition::new(r, d).unwrap();
    }
    NatalSnapshot::new(birth(), ascendant, positions).unwrap()
}

fn assert_tiled(parent: &PeriodNode) {
    let Some(children) = parent.children.as_deref() else {
        return;
    };
    assert!(!children.is_empty(), "materialized level must not be empty");
    assert_eq!(children[0].start_jd, parent.start_jd);
    assert_eq!(children[children.len() - 1].end_jd, parent.end_jd);
    for w in children.windows(2) {
        assert_eq!(w[0].end_jd, w[1].start_jd, "siblings must be contiguous");
    }
    for c in children {
        assert!(c.end_jd > c.start_jd, "every period must have positive length");
        assert_eq!(c.depth, parent.depth + 1);
        assert_tiled(c);
    }
}

/// Every level of every system tiles its parent with no gaps or overlaps.
#[test]
fn contiguity_and_span_conservation() {
    let opts = DashaOptions::new(3);
    for snap in sample_charts().iter().take(12) {
        for system in ALL_DASHA_SYSTEMS {
            let tree = dasha_tree(snap, system, &opts).unwrap();
            assert_eq!(tree.top_level[0].start_jd, snap.birth_jd());
            for w in tree.top_level.windows(2) {
                assert_eq!(w[0].end_jd, w[1].start_jd, "{system} mahadashas not contiguous");
            }
            for maha in &tree.top_level {
                assert!(maha.end_jd > maha.start_jd);
                assert_tiled(maha);
            }
        }
    }
}

/// Two generations from the same inputs serialize to identical bytes.
#[test]
fn determinism_byte_identical_json() {
    let snap = sample_charts().remove(7);
    let opts = DashaOptions::new(3).with_horizon_years(130.0);
    for system in ALL_DASHA_SYSTEMS {
        let render = || {
            let tree = dasha_tree(&snap, system, &opts).unwrap();
            render_tree(&tree, DatePrecision::Full).unwrap()
        };
        let (a, b) = (render(), render());
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap(),
            "{system} output is not deterministic"
        );
    }
}

/// Moon at the very start of Ashwini: one full Vimshottari cycle is 120 years.
#[test]
fn vimshottari_cycle_closes_at_120_years() {
    let mut lons = [100.0; 9];
    lons[Graha::Chandra.index() as usize] = 0.0;
    let tree = vimshottari_tree(&chart(10.0, lons), &DashaOptions::new(1)).unwrap();
    assert_eq!(tree.top_level.len(), 9);
    let total = tree.end_jd() - tree.start_jd();
    assert!(
        (total - 120.0 * DAYS_PER_YEAR).abs() < 1e-6,
        "one cycle should span 120y, got {} days",
        total
    );
    assert_eq!(tree.top_level[0].owner, DashaEntity::Graha(Graha::Ketu));
    assert_eq!(tree.top_level[8].owner, DashaEntity::Graha(Graha::Buddh));
}

/// Each sign has exactly one direction; the split is six and six.
#[test]
fn chara_direction_is_exhaustive() {
    let forward: Vec<Rashi> = Rashi::all()
        .iter()
        .copied()
        .filter(|&r| chara::direction(r) == Direction::Forward)
        .collect();
    assert_eq!(
        forward,
        vec![
            Rashi::Mesha,
            Rashi::Mithuna,
            Rashi::Simha,
            Rashi::Tula,
            Rashi::Dhanu,
            Rashi::Kumbha
        ]
    );
    for r in Rashi::all() {
        let seq = chara::sequence(*r, chara::direction(*r));
        assert_eq!(seq[0], *r);
        let mut sorted = seq.to_vec();
        sorted.sort();
        assert_eq!(sorted, Rashi::all().to_vec());
    }
}

/// Chara sign durations always fall in 1..=12 years.
#[test]
fn chara_duration_bounds() {
    for snap in sample_charts() {
        for r in Rashi::all() {
            let y = duration_for_sign(*r, &snap);
            assert!((1..=12).contains(&y), "{} got {y} years", r.name());
        }
    }
}

/// Mangal in Vrischika (its own exception sign), Ketu in Makara: Ketu counts.
#[test]
fn dual_lordship_exception_fixture() {
    let mut grahas = [(Rashi::Mithuna, 12.0); 9];
    grahas[Graha::Mangal.index() as usize] = (Rashi::Vrischika, 4.0);
    grahas[Graha::Ketu.index() as usize] = (Rashi::Makara, 19.0);
    let snap = chart_from_positions((Rashi::Karka, 2.0), grahas);

    let lord = resolve_lord(Rashi::Vrischika, &snap, true).unwrap();
    assert_eq!(lord.graha, Graha::Ketu);
    assert_eq!(lord.rashi, Rashi::Makara);
    // Vrischika counts backward: Tula, Kanya, ..., Makara is the 10th step.
    assert_eq!(duration_for_sign(Rashi::Vrischika, &snap), 10);
}

/// Both co-lords in the exception sign: fallback by default, error when strict.
#[test]
fn ambiguous_dual_lordship_is_opt_in_error() {
    let mut grahas = [(Rashi::Mithuna, 12.0); 9];
    grahas[Graha::Mangal.index() as usize] = (Rashi::Vrischika, 4.0);
    grahas[Graha::Ketu.index() as usize] = (Rashi::Vrischika, 19.0);
    let snap = chart_from_positions((Rashi::Vrischika, 2.0), grahas);

    assert_eq!(duration_for_sign(Rashi::Vrischika, &snap), 12);
    assert!(dasha_tree(&snap, DashaSystem::Chara, &DashaOptions::new(2)).is_ok());

    let strict = DashaOptions {
        strict_dual_lordship: true,
        ..DashaOptions::new(2)
    };
    assert!(matches!(
        dasha_tree(&snap, DashaSystem::Chara, &strict),
        Err(DashaError::AmbiguousDualLordship {
            rashi: Rashi::Vrischika
        })
    ));
}

/// A lord in its own sign gives that sign the full 12 years.
#[test]
fn own_sign_gives_twelve_years() {
    let mut grahas = [(Rashi::Kanya, 1.0); 9];
    grahas[Graha::Mangal.index() as usize] = (Rashi::Mesha, 15.0);
    grahas[Graha::Shukra.index() as usize] = (Rashi::Tula, 15.0);
    let snap = chart_from_positions((Rashi::Mesha, 0.0), grahas);
    assert_eq!(duration_for_sign(Rashi::Mesha, &snap), 12);
    assert_eq!(duration_for_sign(Rashi::Tula, &snap), 12);

    let tree = dasha_tree(&snap, DashaSystem::Chara, &DashaOptions::new(1)).unwrap();
    assert_eq!(tree.top_level[0].owner, DashaEntity::Rashi(Rashi::Mesha));
    let years = tree.top_level[0].duration_days() / DAYS_PER_YEAR;
    assert!((years - 12.0).abs() < 1e-9);
}

/// At pada_span = 10/3 deg the two traversal directions mirror each other.
#[test]
fn boundary_mirroring_at_pada_span() {
    let span = 10.0 / 3.0;
    for &d in &[0.0, 1e-9, 0.5, span / 2.0, 2.9, span - 1e-9] {
        let savya = balance_of_first_period(d, span, PathDirection::Savya);
        let apasavya = balance_of_first_period(d, span, PathDirection::Apasavya);
        assert!((savya + apasavya - 1.0).abs() < 1e-12, "d = {d}");
        assert!((0.0..=1.0).contains(&savya) && (0.0..=1.0).contains(&apasavya));
        assert_eq!(savya, pada_birth_balance(d, span, Direction::Forward));
    }
    assert!((PADA_SPAN - span).abs() < 1e-12);
}

/// Moon longitudes a hair either side of every pada boundary seed the same tree.
#[test]
fn jitter_stability_across_systems() {
    let opts = DashaOptions::new(1);
    for cell in (0..108u32).step_by(7) {
        let boundary = f64::from(cell) * PADA_SPAN;
        let mut below = [45.0; 9];
        let mut above = [45.0; 9];
        below[Graha::Chandra.index() as usize] = (boundary - 4e-7).rem_euclid(360.0);
        above[Graha::Chandra.index() as usize] = boundary + 4e-7;
        let a = chart(200.0, below);
        let b = chart(200.0, above);
        for system in [DashaSystem::Vimshottari, DashaSystem::Yogini, DashaSystem::KaalChakra] {
            let ta = dasha_tree(&a, system, &opts).unwrap();
            let tb = dasha_tree(&b, system, &opts).unwrap();
            let owners_a: Vec<_> = ta.top_level.iter().map(|p| p.owner).collect();
            let owners_b: Vec<_> = tb.top_level.iter().map(|p| p.owner).collect();
            assert_eq!(owners_a, owners_b, "{system} flipped at cell {cell}");
        }
    }
}

/// The Kaal Chakra path table agrees with its own nakshatra partition.
#[test]
fn path_table_partition_agrees_with_cells() {
    let table = NakshatraPathTable::builtin();
    assert!(table.validate().is_ok());
    let json = table.to_json().unwrap();
    let reloaded = NakshatraPathTable::from_json(&json).unwrap();
    assert_eq!(reloaded, table);
}

/// Kaal Chakra mahadashas walk the 12 signs from the seeded start.
#[test]
fn kaal_chakra_walks_all_signs_once() {
    let mut lons = [45.0; 9];
    lons[Graha::Chandra.index() as usize] = 2.0 * PADA_SPAN + 0.7;
    let tree = kaal_chakra_tree(&chart(10.0, lons), &DashaOptions::new(2)).unwrap();
    let mut owners: Vec<Rashi> = tree
        .top_level
        .iter()
        .map(|p| p.owner.rashi().unwrap())
        .collect();
    assert_eq!(owners.len(), 12);
    owners.sort();
    assert_eq!(owners, Rashi::all().to_vec());
}

/// A query below the generated depth expands lazily and agrees with a full tree.
#[test]
fn lazy_query_matches_materialized_tree() {
    let snap = sample_charts().remove(3);
    for system in ALL_DASHA_SYSTEMS {
        let shallow = dasha_tree(&snap, system, &DashaOptions::new(1)).unwrap();
        let deep = dasha_tree(&snap, system, &DashaOptions::new(4)).unwrap();
        let jd = snap.birth_jd() + 17.77 * DAYS_PER_YEAR;
        if jd >= shallow.end_jd() {
            continue;
        }
        let lazy = locate(&shallow, jd, 4).unwrap();
        let eager = locate(&deep, jd, 4).unwrap();
        assert_eq!(lazy.owner, eager.owner, "{system}");
        assert_eq!(lazy.start_jd, eager.start_jd);
        assert_eq!(lazy.end_jd, eager.end_jd);

        let chain = locate_chain(&shallow, jd, 4).unwrap();
        assert_eq!(chain.periods.len(), 4);
        assert_eq!(chain.periods[3].owner, lazy.owner);
    }
}

/// Proportional Chara sub-periods still tile the parent.
#[test]
fn chara_proportional_sub_periods_tile() {
    let snap = sample_charts().remove(11);
    let opts = DashaOptions::new(3).with_chara_sub_periods(RashiSubPeriodMethod::Proportional);
    let tree = dasha_tree(&snap, DashaSystem::Chara, &opts).unwrap();
    for maha in &tree.top_level {
        assert_tiled(maha);
        assert_eq!(maha.children.as_ref().unwrap()[0].owner, maha.owner);
    }
}

/// A horizon override keeps generating past one cycle.
#[test]
fn horizon_override_covers_requested_years() {
    let snap = sample_charts().remove(5);
    let opts = DashaOptions::new(1).with_horizon_years(200.0);
    for system in ALL_DASHA_SYSTEMS {
        let tree = dasha_tree(&snap, system, &opts).unwrap();
        assert!(
            tree.end_jd() >= snap.birth_jd() + 200.0 * DAYS_PER_YEAR,
            "{system} stops short of the horizon"
        );
    }
}

/// Engines sharing a cache generate each tree once.
#[test]
fn shared_cache_across_engines() {
    let cache = Arc::new(DashaCache::new());
    let a = DashaEngine::new(DashaOptions::new(2))
        .unwrap()
        .with_cache(Arc::clone(&cache));
    let b = DashaEngine::new(DashaOptions::new(2))
        .unwrap()
        .with_cache(Arc::clone(&cache));
    let snap = sample_charts().remove(0);
    let ta = a.tree(&snap, DashaSystem::Ashtottari).unwrap();
    let tb = b.tree(&snap, DashaSystem::Ashtottari).unwrap();
    assert!(Arc::ptr_eq(&ta, &tb));
    assert_eq!(cache.len(), 1);
}

/// Bad positions never reach a generator: every system reports the
/// offending body as an invalid longitude.
#[test]
fn invalid_positions_are_rejected_for_every_system() {
    let engine = DashaEngine::new(DashaOptions::new(2)).unwrap();
    let good = [10.0, 123.4, 200.0, 45.0, 250.0, 300.0, 77.0, 15.0, 195.0];

    for system in ALL_DASHA_SYSTEMS {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 360.0, -0.5] {
            let asc_err = NatalSnapshot::from_longitudes(birth(), bad, good)
                .and_then(|snap| dasha_tree(&snap, system, &DashaOptions::default()))
                .unwrap_err();
            assert!(
                matches!(asc_err, DashaError::InvalidLongitude { what: "ascendant", .. }),
                "{system}: ascendant {bad} gave {asc_err:?}"
            );

            let mut lons = good;
            lons[Graha::Chandra.index() as usize] = bad;
            let moon_err = NatalSnapshot::from_longitudes(birth(), 95.0, lons)
                .and_then(|snap| engine.tree(&snap, system).map(|_| ()))
                .unwrap_err();
            assert!(
                matches!(moon_err, DashaError::InvalidLongitude { what: "chandra", .. }),
                "{system}: moon {bad} gave {moon_err:?}"
            );
        }

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 30.0, 31.5, -1e-9] {
            let err = PlanetaryPosition::new(Rashi::Karka, bad)
                .and_then(|moon| {
                    let asc = PlanetaryPosition::new(Rashi::Mesha, 4.0)?;
                    let mut grahas = [asc; 9];
                    grahas[Graha::Chandra.index() as usize] = moon;
                    NatalSnapshot::new(birth(), asc, grahas)
                })
                .and_then(|snap| dasha_tree(&snap, system, &DashaOptions::default()))
                .unwrap_err();
            assert!(
                matches!(err, DashaError::InvalidLongitude { .. }),
                "{system}: degree {bad} gave {err:?}"
            );
        }
    }
}
