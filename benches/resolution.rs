use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fruit_drop::core::{find_matches, resolve_all, GameSession, Grid, SessionConfig};
use fruit_drop::types::{GameAction, TICK_MS};

/// Bottom half striped so every column holds a stack of alternating matches
fn chain_grid() -> Grid {
    Grid::from_rows(&[
        "CCPPOOBBMM",
        "CCPPOOBBMM",
        "PPOOBBMMUU",
        "PPOOBBMMUU",
        "OOBBMMUUGG",
        "OOBBMMUUGG",
        "GCUPMOBCGU",
        "UGCPMOBCGU",
        "GUGCPMOBCG",
        "CGUGCPMOBC",
    ])
}

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::default().with_seed(12345)).unwrap();
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(TICK_MS));
        })
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let grid = chain_grid();
    c.bench_function("find_matches_half_board", |b| {
        b.iter(|| find_matches(black_box(&grid)))
    });
}

fn bench_resolve_all(c: &mut Criterion) {
    c.bench_function("resolve_all_half_board", |b| {
        b.iter(|| {
            let mut grid = chain_grid();
            resolve_all(&mut grid, black_box(5))
        })
    });
}

fn bench_apply_action(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::default().with_seed(12345)).unwrap();
    session.start();

    c.bench_function("apply_move_and_rotate", |b| {
        b.iter(|| {
            session.apply_action(GameAction::MoveRight);
            session.apply_action(GameAction::Rotate);
            session.apply_action(GameAction::MoveLeft);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_find_matches,
    bench_resolve_all,
    bench_apply_action
);
criterion_main!(benches);
