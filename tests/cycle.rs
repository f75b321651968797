use phase_plane::{
    Config, CubicSystem, CurveKind, CycleLocator, CycleSearchBracket, IntegrationError, State,
};

const TOLERANCE: f64 = 0.01;

#[test]
fn locate_cycle_of_cubic_system() {
    let config = Config::new(TOLERANCE, 1.0);
    let mut locator = CycleLocator::new(CubicSystem, &config).unwrap();
    let bracket = CycleSearchBracket::default();

    // the bracket straddles the cycle
    assert!(locator.single_loop(bracket.x1, bracket.y, 1.0).unwrap() > 0.0);
    assert!(locator.single_loop(bracket.x2, bracket.y, 1.0).unwrap() < 0.0);

    let cycle = locator.locate(&bracket, 1.0).unwrap();
    assert!(cycle.displacement.abs() < TOLERANCE);
    assert!(cycle.x > bracket.x1 && cycle.x < bracket.x2);
    assert!(cycle.bisections <= 60);

    let curve = &cycle.curve;
    assert_eq!(curve.kind(), CurveKind::LimitingCycle);
    assert_eq!(curve.first(), State::new(cycle.x, 0.0));
    assert!((curve.last() - curve.first()).norm() < 0.05);

    // the residual at the located abscissa is reproduced exactly
    let again = locator.single_loop(cycle.x, bracket.y, 1.0).unwrap();
    assert_eq!(again, cycle.displacement);
}

#[test]
fn tighter_tolerance_refines_the_cycle() {
    let bracket = CycleSearchBracket::default();
    let coarse = CycleLocator::new(CubicSystem, &Config::new(1e-2, 1.0))
        .unwrap()
        .locate(&bracket, 1.0)
        .unwrap();
    let fine = CycleLocator::new(CubicSystem, &Config::new(1e-4, 1.0))
        .unwrap()
        .locate(&bracket, 1.0)
        .unwrap();
    assert!(fine.displacement.abs() < 1e-4);
    assert!((fine.x - coarse.x).abs() < 0.05);
}

#[test]
fn backward_search_finds_unstable_cycle() {
    // r' = r (r^2 - 1), theta' = 1: the unit circle repels and attracts in reversed time
    let unstable = phase_plane::FnSystem(|_alpha: f64, p: &State| {
        let r2 = p.norm_squared();
        State::new(-p[0] - p[1] + p[0] * r2, p[0] - p[1] + p[1] * r2)
    });
    let mut locator = CycleLocator::new(unstable, &Config::new(1e-3, 0.0)).unwrap();
    let bracket = CycleSearchBracket {
        x1: 0.5,
        x2: 1.5,
        y: 0.0,
    };
    let cycle = locator.locate(&bracket, -1.0).unwrap();
    assert!((cycle.x - 1.0).abs() < 1e-2, "x = {}", cycle.x);
    assert!(cycle.curve.points().all(|p| (p.norm() - 1.0).abs() < 1e-2));
}

#[test]
fn invalid_tolerance_is_reported() {
    for eps in [0.0, -0.01] {
        let err = CycleLocator::new(CubicSystem, &Config::new(eps, 1.0))
            .err()
            .unwrap();
        assert_eq!(err, IntegrationError::InvalidTolerance { eps });
    }
}
