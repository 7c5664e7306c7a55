use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sirenia::geo::{Mercator, vector};
use sirenia::graph::{Entity, EntityId, Graph, Node, Way, loc};
use sirenia::{MoveAction, MoveCache};
use std::hint::black_box;
use std::time::Duration;

/// A stationary street grid with a moving polyline whose vertices sit on every crossing street.
fn build_grid(streets: usize) -> (Graph, EntityId) {
    let step = 0.001;
    let mut entities: Vec<Entity> = Vec::new();
    let mut moving: Vec<EntityId> = Vec::new();

    for s in 0..streets {
        let x = s as f64 * step;
        let south = format!("n{s}_s");
        let north = format!("n{s}_n");
        let shared = format!("n{s}_m");
        entities.push(Node::new(south.as_str(), loc(x, 0.0)).into());
        entities.push(Node::new(shared.as_str(), loc(x, 0.005)).into());
        entities.push(Node::new(north.as_str(), loc(x, 0.01)).into());
        entities.push(Way::new(format!("w{s}"), [south, shared.clone(), north]).into());
        moving.push(EntityId::from(shared));
    }

    let id = EntityId::from("w_moving");
    entities.push(Way::new(id.clone(), moving).into());
    (Graph::from_entities(entities), id)
}

fn bench_drag_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_preview");
    group.measurement_time(Duration::from_secs(10));

    let projection = Mercator::at_zoom(17.0);
    for streets in [10usize, 50, 200] {
        let (graph, way) = build_grid(streets);

        group.bench_with_input(
            BenchmarkId::new("cold_cache", streets),
            &graph,
            |b, graph| {
                b.iter(|| {
                    let mut action = MoveAction::new([way.clone()], vector(3.0, 2.0), projection);
                    black_box(action.apply_uncached(black_box(graph)).map(|g| g.len()))
                })
            },
        );

        let mut cache = MoveCache::new();
        let mut step = 0u32;
        group.bench_with_input(
            BenchmarkId::new("warm_cache", streets),
            &graph,
            |b, graph| {
                b.iter(|| {
                    step = step.wrapping_add(1) % 32;
                    let offset = f64::from(step) * 0.5;
                    let mut action =
                        MoveAction::new([way.clone()], vector(offset, offset), projection);
                    black_box(action.apply(black_box(graph), &mut cache).map(|g| g.len()))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_drag_preview);
criterion_main!(benches);
