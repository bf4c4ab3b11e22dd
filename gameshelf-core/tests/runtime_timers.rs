use std::sync::{Arc, Mutex};
use std::time::Duration;

use gameshelf_core::{
    Direction, GestureTarget, RowMode, ShelfConfig, ShelfHandle, ShelfHost,
    ShelfMessage, ShelfModel, ShelfOptions, ShelfRuntime, ShelfSignal,
};
use tokio::task::JoinHandle;

#[derive(Clone, Default)]
struct Recorder {
    signals: Arc<Mutex<Vec<ShelfSignal>>>,
}

impl Recorder {
    fn take(&self) -> Vec<ShelfSignal> {
        std::mem::take(&mut *self.signals.lock().unwrap())
    }
}

impl ShelfHost for Recorder {
    fn item_selected(&mut self, index: usize) {
        self.signals
            .lock()
            .unwrap()
            .push(ShelfSignal::ItemSelected(index));
    }

    fn item_long_pressed(&mut self, index: usize) {
        self.signals
            .lock()
            .unwrap()
            .push(ShelfSignal::ItemLongPressed(index));
    }

    fn add_requested(&mut self) {
        self.signals.lock().unwrap().push(ShelfSignal::AddRequested);
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn spawn_shelf(
    items: usize,
) -> (ShelfHandle, Recorder, JoinHandle<(ShelfModel, Recorder)>) {
    let config = ShelfConfig {
        columns: Some(4),
        ..ShelfConfig::default()
    };
    let covers = (0..items).map(|i| format!("/covers/{i}.png"));
    let model = ShelfModel::new(ShelfOptions::new(covers, RowMode::One), config);
    let recorder = Recorder::default();
    let (runtime, handle) = ShelfRuntime::new(model, recorder.clone());
    let task = tokio::spawn(runtime.run());
    (handle, recorder, task)
}

fn press(position: usize) -> ShelfMessage {
    ShelfMessage::ContactStart {
        target: GestureTarget::Tile(position),
        x: 0.0,
        y: 0.0,
    }
}

#[tokio::test(start_paused = true)]
async fn held_contact_fires_long_press_once() {
    let (handle, recorder, _task) = spawn_shelf(6);

    handle.send(press(3)).unwrap();
    tokio::time::sleep(ms(450)).await;
    assert!(recorder.take().is_empty());

    tokio::time::sleep(ms(150)).await;
    assert_eq!(recorder.take(), vec![ShelfSignal::ItemLongPressed(3)]);

    handle.send(ShelfMessage::ContactEnd).unwrap();
    tokio::time::sleep(ms(1000)).await;
    assert!(recorder.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn short_tap_never_turns_into_long_press() {
    let (handle, recorder, _task) = spawn_shelf(6);

    handle.send(press(1)).unwrap();
    tokio::time::sleep(ms(120)).await;
    handle.send(ShelfMessage::ContactEnd).unwrap();
    tokio::time::sleep(ms(2000)).await;

    assert_eq!(recorder.take(), vec![ShelfSignal::ItemSelected(1)]);
}

#[tokio::test(start_paused = true)]
async fn collection_replace_cancels_pending_long_press() {
    let (handle, recorder, task) = spawn_shelf(6);

    handle.send(press(2)).unwrap();
    tokio::time::sleep(ms(100)).await;
    handle
        .send(ShelfMessage::SetCollection {
            items: vec!["/covers/x.png".into()],
            add_slot: true,
        })
        .unwrap();
    tokio::time::sleep(ms(1000)).await;
    assert!(recorder.take().is_empty());

    handle.unmount().unwrap();
    let (model, _) = task.await.unwrap();
    assert_eq!(model.state().items(), ["/covers/x.png".to_string()]);
    assert_eq!(model.state().selected_index(), None);
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_runtime_and_silences_timers() {
    let (handle, recorder, task) = spawn_shelf(6);

    handle.send(press(0)).unwrap();
    handle.unmount().unwrap();
    let (model, _) = task.await.unwrap();
    assert_eq!(model.pending_long_press(), None);

    tokio::time::sleep(ms(1000)).await;
    assert!(recorder.take().is_empty());
    assert!(handle.send(ShelfMessage::Tick).is_err());
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_runtime() {
    let (handle, _recorder, task) = spawn_shelf(3);
    handle.send(ShelfMessage::Navigate(Direction::Next)).unwrap();
    drop(handle);
    let (model, _) = task.await.unwrap();
    assert_eq!(model.state().scroll_offset(), 0);
}

#[tokio::test(start_paused = true)]
async fn directives_follow_navigation_and_bounce() {
    let (handle, _recorder, _task) = spawn_shelf(9);
    let mut directives = handle.subscribe();
    assert_eq!(directives.borrow().page, 0);

    handle.send(ShelfMessage::Navigate(Direction::Next)).unwrap();
    let snapshot = directives
        .wait_for(|d| d.page == 1)
        .await
        .unwrap()
        .clone();
    assert!(snapshot.bouncing_next);
    assert_eq!(snapshot.visible.first().map(|t| t.position), Some(4));

    tokio::time::sleep(ms(500)).await;
    assert!(!directives.borrow().bouncing_next);
    assert_eq!(directives.borrow().page, 1);
}
