// Phase portrait of x' = x + y - alpha x^3, y' = -x + y - y^3 and its limiting cycle

use phase_plane::*;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() {
    SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = Config::default();
    let mut portrait = Portrait::new();

    let mut tracer = match CurveTracer::new(CubicSystem, &config) {
        Ok(tracer) => tracer,
        Err(e) => {
            println!("An error occured: {}", e);
            return;
        }
    };
    let bounds = Bounds::new(-2.0, 2.0, -2.0, 2.0);
    match portrait.quick_fill(&mut tracer, &bounds, 4, 4, 2.0) {
        Ok(()) => println!("{}", tracer.stats()),
        Err(e) => println!("An error occured: {}", e),
    }

    let mut locator = match CycleLocator::new(CubicSystem, &config) {
        Ok(locator) => locator,
        Err(e) => {
            println!("An error occured: {}", e);
            return;
        }
    };
    match locator.locate(&CycleSearchBracket::default(), 1.0) {
        Ok(cycle) => {
            println!(
                "Limiting cycle through ({}, 0) after {} bisections, {} points",
                cycle.x,
                cycle.bisections,
                cycle.curve.len()
            );
            portrait.push(cycle.curve);
        }
        Err(e) => println!("An error occured: {}", e),
    }

    for curve in &portrait {
        let label = match curve.kind() {
            CurveKind::LimitingCycle => "limiting cycle",
            CurveKind::Trajectory => "integral curve",
        };
        let (start, end) = (curve.first(), curve.last());
        println!(
            "{:>14}: ({:.3}, {:.3}) -> ({:.3}, {:.3}), {} points",
            label,
            start[0],
            start[1],
            end[0],
            end[1],
            curve.len()
        );
    }
}
