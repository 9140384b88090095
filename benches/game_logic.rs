use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_2048::core::{apply_move, is_game_over, spawn_tile, Board, GameState, TileRng};
use tui_2048::types::Direction;

fn mid_game_board() -> Board {
    Board::from_array([
        [2, 2, 4, 8],
        [0, 4, 4, 16],
        [32, 0, 32, 2],
        [2, 8, 0, 8],
    ])
    .unwrap()
}

fn bench_move(c: &mut Criterion) {
    let board = mid_game_board();

    for dir in [Direction::Left, Direction::Up] {
        c.bench_function(&format!("apply_move_{}", dir.as_str()), |b| {
            b.iter(|| {
                let mut board = board.clone();
                apply_move(&mut board, black_box(dir))
            })
        });
    }
}

fn bench_spawn(c: &mut Criterion) {
    let mut rng = TileRng::new(12345);

    c.bench_function("spawn_tile", |b| {
        b.iter(|| {
            let mut board = mid_game_board();
            spawn_tile(&mut board, &mut rng)
        })
    });
}

fn bench_game_over_check(c: &mut Criterion) {
    let full = Board::from_array([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ])
    .unwrap();

    c.bench_function("is_game_over_full", |b| b.iter(|| is_game_over(black_box(&full))));
}

fn bench_turn(c: &mut Criterion) {
    let mut state = GameState::new(4, 12345);
    let mut i = 0usize;

    c.bench_function("game_turn", |b| {
        b.iter(|| {
            if state.is_over() {
                state.restart();
            }
            i = i.wrapping_add(1);
            state.apply_move(Direction::ALL[i % 4])
        })
    });
}

criterion_group!(
    benches,
    bench_move,
    bench_spawn,
    bench_game_over_check,
    bench_turn
);
criterion_main!(benches);
