//! Tests for the snapshot polling loop.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use futures::future;
use strictly_client::{
    AreaCommand, AreaSnapshot, CommandFuture, CommandSender, ConnectFourAreaController,
    ConnectFourSnapshot, ConnectFourState, GameRecord, Occupant, TransportError, watch_area,
};
use strictly_connect_four::{FirstPlayer, GamePiece, GameStatus, Move};

#[derive(Debug)]
struct NullSender;

impl CommandSender for NullSender {
    fn send(&self, _area_id: &str, _command: AreaCommand) -> CommandFuture {
        Box::pin(future::ready(Ok::<(), TransportError>(())))
    }
}

fn controller() -> ConnectFourAreaController {
    ConnectFourAreaController::new(
        ConnectFourSnapshot::empty("area1"),
        "alice".to_string(),
        Arc::new(NullSender),
    )
}

fn one_move() -> ConnectFourSnapshot {
    AreaSnapshot {
        id: "area1".to_string(),
        occupants: vec![Occupant::new("alice".to_string(), "Alice".to_string())],
        game: Some(GameRecord {
            id: "game1".to_string(),
            players: vec!["alice".to_string()],
            state: ConnectFourState {
                moves: vec![Move::new(5, 3, GamePiece::Red)],
                status: GameStatus::InProgress,
                first_player: Some(FirstPlayer::Red),
                ..ConnectFourState::default()
            },
        }),
    }
}

#[tokio::test]
async fn test_shutdown_interrupts_hung_fetch() {
    let mut controller = controller();
    let started = Rc::new(Cell::new(false));
    let flag = Rc::clone(&started);

    let watching = watch_area(
        &mut controller,
        move || {
            flag.set(true);
            future::pending::<Result<ConnectFourSnapshot, TransportError>>()
        },
        Duration::from_millis(5),
        Duration::from_secs(60),
        tokio::time::sleep(Duration::from_millis(50)),
    );

    tokio::time::timeout(Duration::from_secs(5), watching)
        .await
        .expect("Watch did not stop during a hung fetch");
    assert!(started.get());
}

#[tokio::test]
async fn test_fetched_snapshots_are_applied() {
    let mut controller = controller();

    watch_area(
        &mut controller,
        || future::ready(Ok::<_, TransportError>(one_move())),
        Duration::from_millis(5),
        Duration::from_secs(1),
        tokio::time::sleep(Duration::from_millis(50)),
    )
    .await;

    assert_eq!(controller.move_count(), 1);
    assert_eq!(controller.status(), GameStatus::InProgress);
}

#[tokio::test]
async fn test_timed_out_fetch_is_retried() {
    let mut controller = controller();
    let attempts = Rc::new(Cell::new(0));
    let counter = Rc::clone(&attempts);

    watch_area(
        &mut controller,
        move || {
            counter.set(counter.get() + 1);
            future::pending::<Result<ConnectFourSnapshot, TransportError>>()
        },
        Duration::from_millis(5),
        Duration::from_millis(10),
        tokio::time::sleep(Duration::from_millis(200)),
    )
    .await;

    assert!(attempts.get() >= 2);
    assert_eq!(controller.move_count(), 0);
}

#[tokio::test]
async fn test_fetch_errors_keep_polling() {
    let mut controller = controller();
    let attempts = Rc::new(Cell::new(0));
    let counter = Rc::clone(&attempts);

    watch_area(
        &mut controller,
        move || {
            counter.set(counter.get() + 1);
            future::ready(Err::<ConnectFourSnapshot, _>(TransportError::new(
                "server offline",
            )))
        },
        Duration::from_millis(5),
        Duration::from_secs(1),
        tokio::time::sleep(Duration::from_millis(100)),
    )
    .await;

    assert!(attempts.get() >= 2);
}
