//! Integration tests comparing pipeline stages against reference values.
//!
//! The reference sequences are a 41-frame `paw1` trial recorded at 19 fps,
//! produced by the pandas/numpy implementation of the same stages. The
//! smoothed speed is the median-filtered (window 3) output of speed
//! derivation on the raw coordinates; later stages are checked from it.
//!
//! The raw coordinates behind it are not part of the fixtures, so nothing
//! here checks speed derivation or the median filter. Those stages are
//! covered by the unit tests in `src/transform/speed.rs` and
//! `src/transform/filter.rs`; `leading_nan_is_filled_from_neighbours`
//! reproduces the finite first value the smoothed sequence starts with.

use trial_kinematics::core::TrialTable;
use trial_kinematics::transform::{
    apply_convolution, causal_convolve, decay_kernel, elapsed_seconds, normalize_speed,
};

const RTOL: f64 = 1e-10;
const FRAME_RATE: f64 = 19.0;
const SPEED: &str = "paw1_speed (pixels per second)";
const NORMALIZED: &str = "paw1_speed (normalized)";

const SMOOTHED_PAW1: [f64; 41] = [
    11.61019506231878,
    22.10746855460816,
    11.61019506231878,
    8.72191097741752,
    8.72191097741752,
    8.150387060775728,
    8.150387060775728,
    8.150387060775728,
    10.700233740579602,
    19.55936497418573,
    19.55936497418573,
    5.789661468183895,
    5.424312090290383,
    5.789661468183895,
    5.424312090290383,
    6.803101898845965,
    26.463162275577343,
    26.463162275577343,
    19.817659913011504,
    19.817659913011504,
    19.817659913011504,
    22.41813036616135,
    22.41813036616135,
    22.41813036616135,
    15.17092512565473,
    15.17092512565473,
    19.340060895472423,
    19.340060895472423,
    15.878970476404154,
    13.637049245776923,
    13.637049245776923,
    9.229595213266528,
    9.229595213266528,
    7.498996147946154,
    5.096165473771867,
    4.518893963105363,
    4.518893963105363,
    15.29965879712601,
    15.29965879712601,
    16.651763584214756,
    16.651763584214756,
];

const CONVOLVED_PAW1: [f64; 41] = [
    11.61019506231878,
    33.122402878971265,
    43.03439512258013,
    49.54991028488487,
    55.73137159685746,
    61.02438225646514,
    66.04601750727619,
    70.81019090761038,
    77.87994934022144,
    93.44636881544048,
    108.21468986988278,
    108.4561279185778,
    108.31983793507891,
    108.55588498779603,
    108.41448040748628,
    109.65911552209263,
    130.4999979239147,
    150.27235744807905,
    162.38547545557176,
    173.877547604198,
    184.7804152380756,
    197.7247576322021,
    210.00543686093653,
    221.65647927986242,
    225.46296145511278,
    229.07428330992988,
    236.66958658524024,
    243.87547471219256,
    247.25082278886438,
    248.2111937838925,
    249.12232605862835,
    245.57929007535427,
    242.2179073892632,
    237.29826547603136,
    230.22802548764957,
    222.9430088692142,
    216.0314988408949,
    220.25511035961975,
    224.26217511957097,
    229.41590037276052,
    234.30539145236662,
];

const NORMALIZED_PAW1: [f64; 41] = [
    0.04660439409828906,
    0.13295638091937312,
    0.17274403223279328,
    0.19889791119413283,
    0.2237108671815374,
    0.2449575002848347,
    0.265114807461026,
    0.28423863901682556,
    0.3126173015978231,
    0.3751023454776544,
    0.43438374866657103,
    0.43535290326830756,
    0.43480582270088053,
    0.43575333734740634,
    0.43518572631652475,
    0.4401818064924679,
    0.5238390311641634,
    0.6032071064265594,
    0.6518302796247817,
    0.6979605174498802,
    0.7417256339947205,
    0.7936854185668998,
    0.8429811979658296,
    0.8897495571219814,
    0.905029127746874,
    0.919525306840703,
    0.9500135549053219,
    0.97893865463828,
    0.9924876132164745,
    0.9963426309911645,
    1.0,
    0.9857779266943731,
    0.9722850264823705,
    0.9525371299727897,
    0.9241565343825018,
    0.8949138055845981,
    0.8671703666979014,
    0.8841243329904723,
    0.9002090606154391,
    0.9208965892473638,
    0.9405234575291549,
];

/// Assert element-wise `|actual - expected| <= rtol * |expected|`.
fn assert_allclose(actual: &[f64], expected: &[f64], rtol: f64, stage: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{} length mismatch",
        stage
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= rtol * e.abs(),
            "{} mismatch at frame {}: rust={}, reference={}, diff={}",
            stage,
            i,
            a,
            e,
            (a - e).abs()
        );
    }
}

fn smoothed_table() -> TrialTable {
    let time = elapsed_seconds(SMOOTHED_PAW1.len(), FRAME_RATE).unwrap();
    TrialTable::from_columns(vec![
        ("time (seconds)", time),
        (SPEED, SMOOTHED_PAW1.to_vec()),
    ])
    .unwrap()
}

#[test]
fn decay_convolution_matches_reference() {
    let mut table = smoothed_table();
    apply_convolution(&mut table, 1.0).unwrap();

    assert_allclose(
        table.column(SPEED).unwrap(),
        &CONVOLVED_PAW1,
        RTOL,
        "convolution",
    );
}

#[test]
fn slice_level_convolution_matches_table_level() {
    let time = elapsed_seconds(SMOOTHED_PAW1.len(), FRAME_RATE).unwrap();
    let kernel = decay_kernel(&time, 1.0).unwrap();
    let convolved = causal_convolve(&SMOOTHED_PAW1, &kernel);

    assert_allclose(&convolved, &CONVOLVED_PAW1, RTOL, "slice convolution");
}

#[test]
fn normalization_matches_reference() {
    let mut table = smoothed_table();
    apply_convolution(&mut table, 1.0).unwrap();
    normalize_speed(&mut table).unwrap();

    let normalized = table.column(NORMALIZED).unwrap();
    assert_allclose(normalized, &NORMALIZED_PAW1, RTOL, "normalization");

    let max = normalized.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(max, 1.0);
    assert!((normalized[0] - 0.046604394098289).abs() < 1e-12);
}

#[test]
fn stages_preserve_frame_count() {
    let mut table = smoothed_table();
    apply_convolution(&mut table, 1.0).unwrap();
    normalize_speed(&mut table).unwrap();

    assert_eq!(table.len(), 41);
    for column in table.values_by_column() {
        assert_eq!(column.len(), 41);
    }
}
