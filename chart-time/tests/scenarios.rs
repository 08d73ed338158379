use chart_time::{
    accumulate, accumulate_time, distribute, reduce_to_common_denominator,
    primitives::{approximate, BarPosition, Rational, TimeSignature},
    shift_all, ChartTimeError, Settings,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn q(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

#[test]
fn common_time_at_120() {
    init();
    let four_four = |_| TimeSignature::new(4, 4);
    let position = BarPosition::new(3, 0, 4);
    assert_eq!(accumulate(four_four, &position).unwrap(), q(8, 1));
    let seconds = accumulate_time(four_four, |_| 120.0, &position).unwrap();
    assert_eq!(seconds, q(4, 1));
    assert_eq!(seconds.to_f64(), 4.0);
    assert_eq!(
        distribute(four_four, &q(8, 1)).unwrap(),
        BarPosition::new(3, 0, 1)
    );
}

#[test]
fn quarter_and_sixth() {
    init();
    let reduced = reduce_to_common_denominator(&[
        BarPosition::new(5, 1, 4),
        BarPosition::new(5, 1, 6),
    ])
    .unwrap();
    assert_eq!(
        reduced,
        vec![BarPosition::new(5, 3, 12), BarPosition::new(5, 2, 12)]
    );
    assert_eq!(reduce_to_common_denominator(&reduced).unwrap(), reduced);
}

#[test]
fn shifted_chart_is_displayed_uniformly() {
    init();
    let meter = |bar: u32| match bar {
        1..=4 => TimeSignature::new(4, 4),
        _ => TimeSignature::new(7, 8),
    };
    let notes = vec![
        BarPosition::new(4, 0, 4),
        BarPosition::new(4, 3, 8),
        BarPosition::new(5, 1, 3),
    ];
    let shifted =
        shift_all(meter, &notes, &q(3, 2), &Settings::default()).unwrap();
    assert_eq!(
        shifted,
        vec![
            BarPosition::new(4, 3, 8),
            BarPosition::new(4, 3, 4),
            BarPosition::new(5, 17, 24),
        ]
    );
    let display = reduce_to_common_denominator(&shifted).unwrap();
    assert_eq!(
        display,
        vec![
            BarPosition::new(4, 9, 24),
            BarPosition::new(4, 18, 24),
            BarPosition::new(5, 17, 24),
        ]
    );
    assert_eq!(
        display.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        vec!["[4, 9, 24]", "[4, 18, 24]", "[5, 17, 24]"]
    );
}

#[test]
fn non_positive_meter_is_reported() {
    init();
    let broken = |bar: u32| match bar {
        2 => TimeSignature::new(0, 4),
        _ => TimeSignature::new(4, 4),
    };
    assert!(matches!(
        accumulate(broken, &BarPosition::new(1, 1, 4)),
        Err(ChartTimeError::MalformedMeter { bar: 2, .. })
    ));
    assert!(matches!(
        distribute(broken, &q(1, 1)),
        Err(ChartTimeError::MalformedMeter { bar: 2, .. })
    ));
    assert!(matches!(
        accumulate_time(
            |_| TimeSignature::new(4, 4),
            |bar| if bar == 7 { 0.0 } else { 128.0 },
            &BarPosition::new(1, 1, 4)
        ),
        Err(ChartTimeError::MalformedMeter { bar: 7, .. })
    ));
}

#[test]
fn decimal_tempo_enters_exactly() {
    init();
    assert_eq!(approximate(133.5).unwrap(), q(267, 2));
    // 3/4 bar at 133.5 BPM lasts 3 * 60 / 133.5 = 120/89 seconds.
    let seconds = accumulate_time(
        |_| TimeSignature::new(3, 4),
        |_| 133.5,
        &BarPosition::new(2, 0, 1),
    )
    .unwrap();
    assert_eq!(seconds, q(120, 89));
}
