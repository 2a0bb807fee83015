use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pacman_engine::{
    Cell, CollectibleKind, Direction, Game, GameConfig, GameEvent, GhostMode, Layout, Strategy,
};

const LOOP: &str = "\
#######
#P....#
#.###.#
#..G..#
#######";

const QUARTET: &str = "\
#########
#P......#
#.##.##.#
#GGGG...#
#########";

fn released() -> GameConfig {
    GameConfig {
        house_release_ticks: [0; 4],
        house_release_dots: [0; 4],
        ..GameConfig::default()
    }
}

#[test]
fn single_collectible_scores_and_completes_level() {
    let mut layout = Layout::parse(
        "#######\n#     #\n#     #\n#     #\n#     #\n#    P#\n#######",
    )
    .unwrap();
    layout
        .place_collectible(Cell::new(5, 5), CollectibleKind::Dot)
        .unwrap();
    let mut game = Game::new(&layout, GameConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let events = game.tick(None, &mut rng);
    assert_eq!(
        events,
        vec![
            GameEvent::Dot { points: 10 },
            GameEvent::LevelComplete { level: 1 }
        ]
    );
    assert_eq!(game.round().score(), 10);
    assert_eq!(game.maze().remaining_collectibles(), 0);
    assert_eq!(game.round().level(), 1);

    // The board is rebuilt when the next tick starts.
    let events = game.tick(None, &mut rng);
    assert_eq!(game.round().level(), 2);
    assert_eq!(
        events,
        vec![
            GameEvent::Dot { points: 10 },
            GameEvent::LevelComplete { level: 2 }
        ]
    );
    assert_eq!(game.round().score(), 20);
}

#[test]
fn chasing_ghost_costs_a_life_and_keeps_score() {
    let mut layout = Layout::parse(LOOP).unwrap();
    layout
        .place_collectible(layout.player_start, CollectibleKind::Dot)
        .unwrap();
    layout.ghosts[0].home = layout.player_start;
    let config = GameConfig {
        phase_schedule: vec![],
        ..released()
    };
    let mut game = Game::new(&layout, config).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(game.ghosts()[0].mode(), GhostMode::Chase);

    let events = game.tick(None, &mut rng);
    assert_eq!(
        events,
        vec![
            GameEvent::Dot { points: 10 },
            GameEvent::LifeLost { lives_left: 2 }
        ]
    );
    assert_eq!(game.round().score(), 10);
    assert_eq!(game.round().lives(), 2);

    let snapshot = game.snapshot();
    let start = game.maze().anchor(layout.player_start);
    assert_eq!(snapshot.player.position, start);
    assert_eq!(snapshot.player.heading, Direction::None);
    assert_eq!(snapshot.ghosts[0].agent.position, start);
    assert_eq!(snapshot.ghosts[0].mode, GhostMode::Chase);
    assert!(snapshot.ghosts[0].waiting);
    assert_eq!(snapshot.frightened_remaining, 0);
    assert!(!snapshot.game_over);
}

#[test]
fn scattering_ghost_is_just_as_deadly() {
    let mut layout = Layout::parse(LOOP).unwrap();
    layout.ghosts[0].home = layout.player_start;
    let mut game = Game::new(&layout, released()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(game.ghosts()[0].mode(), GhostMode::Scatter);

    let events = game.tick(None, &mut rng);
    assert_eq!(events, vec![GameEvent::LifeLost { lives_left: 2 }]);
    assert_eq!(game.ghosts()[0].mode(), GhostMode::Scatter);
}

#[test]
fn pellet_and_ghost_on_the_same_tick() {
    let mut layout = Layout::parse(LOOP).unwrap();
    layout
        .place_collectible(layout.player_start, CollectibleKind::PowerPellet)
        .unwrap();
    layout.ghosts[0].home = layout.player_start;
    let mut game = Game::new(&layout, released()).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let events = game.tick(None, &mut rng);
    assert_eq!(
        events,
        vec![
            GameEvent::PowerPellet { points: 50 },
            GameEvent::GhostEaten {
                strategy: Strategy::Aggressive,
                points: 200
            }
        ]
    );
    assert_eq!(game.round().score(), 250);
    assert_eq!(game.round().lives(), 3);
    assert_eq!(game.ghosts()[0].mode(), GhostMode::Eaten);
}

#[test]
fn ghost_chain_doubles_within_one_window() {
    let mut layout = Layout::parse(QUARTET).unwrap();
    layout
        .place_collectible(layout.player_start, CollectibleKind::PowerPellet)
        .unwrap();
    for spawn in &mut layout.ghosts {
        spawn.home = layout.player_start;
    }
    let mut game = Game::new(&layout, released()).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let events = game.tick(None, &mut rng);
    let eaten: Vec<u32> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GhostEaten { .. }))
        .map(GameEvent::points)
        .collect();
    assert_eq!(eaten, vec![200, 400, 800, 1600]);
    assert_eq!(game.round().score(), 50 + 3000);
    assert!(game
        .ghosts()
        .iter()
        .all(|ghost| ghost.mode() == GhostMode::Eaten));
}

#[test]
fn extra_life_at_threshold() {
    let mut layout = Layout::parse(LOOP).unwrap();
    layout
        .place_collectible(layout.player_start, CollectibleKind::Dot)
        .unwrap();
    let config = GameConfig {
        extra_life_score: Some(10),
        house_release_ticks: [1_000; 4],
        house_release_dots: [1_000; 4],
        ..GameConfig::default()
    };
    let mut game = Game::new(&layout, config).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let events = game.tick(None, &mut rng);
    assert_eq!(
        events,
        vec![
            GameEvent::Dot { points: 10 },
            GameEvent::ExtraLife { lives: 4 }
        ]
    );
}

#[test]
fn random_play_never_enters_a_wall() {
    let layout = Layout::classic();
    let mut game = Game::new(&layout, GameConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut input_rng = StdRng::seed_from_u64(4242);
    let mut last_score = 0;

    for _ in 0..6_000 {
        let input = if input_rng.gen_bool(0.1) {
            Some(Direction::PRIORITY[input_rng.gen_range(0..4)])
        } else {
            None
        };
        game.tick(input, &mut rng);

        let maze = game.maze();
        let snapshot = game.snapshot();
        assert!(!maze.is_wall(snapshot.player.cell), "player in wall");
        for ghost in &snapshot.ghosts {
            assert!(
                !maze.is_wall(ghost.agent.cell),
                "{:?} ghost in wall at {}",
                ghost.strategy,
                ghost.agent.cell
            );
        }
        assert!(snapshot.score >= last_score);
        last_score = snapshot.score;
        if snapshot.game_over {
            break;
        }
    }
}

#[test]
fn same_strategy_different_corners_diverge() {
    const ARENA: &str = "\
###########
#.........#
#.........#
#.........#
#.........#
#....G....#
#....G....#
#.........#
#.........#
#....P....#
###########";
    let mut layout = Layout::parse(ARENA).unwrap();
    let home = layout.ghosts[0].home;
    layout.ghosts[1].strategy = Strategy::Aggressive;
    layout.ghosts[1].home = home;
    layout.ghosts[0].corner = Cell::new(10, 5);
    layout.ghosts[1].corner = Cell::new(0, 5);

    let run = |seed: u64| {
        let mut game = Game::new(&layout, released()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..30 {
            game.tick(None, &mut rng);
        }
        game.snapshot()
    };

    let first = run(7);
    let second = run(7);
    assert_eq!(first, second);
    assert_ne!(
        first.ghosts[0].agent.position,
        first.ghosts[1].agent.position
    );
    assert!(first.ghosts[0].agent.cell.x > home.x);
    assert!(first.ghosts[1].agent.cell.x < home.x);
}
