mod common;

use common::{destinations, new_point, offers, point};
use futures::executor::block_on;
use std::sync::Arc;
use tripline::app::{KeyEvents, ManualClock};
use tripline::domain::SortKind;
use tripline::store::{JsonPointsApi, PointsApi};
use tripline::ui::render_text;
use tripline::{launch, Config, DispatchOutcome};

#[test]
fn board_over_json_file_persists_user_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trip.json");
    let seeded = JsonPointsApi::open(&path).unwrap();
    seeded
        .seed(
            destinations(),
            offers(),
            vec![point("a", -1, 2, 20), point("b", 2, 8, 70)],
        )
        .unwrap();
    drop(seeded);

    let api = Arc::new(JsonPointsApi::open(&path).unwrap());
    let clock = Arc::new(ManualClock::new(common::origin()));
    let board = block_on(launch(&Config::default(), api.clone(), KeyEvents::new(), clock));
    assert!(!board.is_loading());

    board.create_point();
    assert_eq!(block_on(board.submit_draft(new_point(15))), DispatchOutcome::Committed);
    assert_eq!(
        block_on(board.delete_point(&common::id("a"))).unwrap(),
        DispatchOutcome::Committed
    );
    board.change_sort(SortKind::Price);

    let rendered = render_text(&board.view_model());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Geneva - Amsterdam");
    assert!(lines[1].ends_with("Total: 125"));
    assert_eq!(lines[2], "day (event) time [price] (offers)");
    assert!(lines[3].contains("Taxi Geneva  15 +Comfort class 40"));
    assert!(lines[4].contains("Flight Amsterdam  70"));

    let reopened = JsonPointsApi::open(&path).unwrap();
    let stored = block_on(reopened.points()).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].base_price, 15);
    assert!(stored.iter().all(|p| p.id.as_str() != "a"));
}
