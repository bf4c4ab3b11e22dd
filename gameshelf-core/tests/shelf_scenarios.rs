use std::time::{Duration, Instant};

use gameshelf_core::constants::layout::MAX_COLUMNS;
use gameshelf_core::shelf::{ADD_MARKER, resolve};
use gameshelf_core::{
    AssetRef, Direction, GestureTarget, RowMode, ShelfConfig, ShelfMessage,
    ShelfModel, ShelfOptions, ShelfSignal, Slot, TimerKind,
    shelf::update,
};

fn covers(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/covers/{i}.png")).collect()
}

fn four_columns() -> ShelfConfig {
    ShelfConfig {
        columns: Some(4),
        ..ShelfConfig::default()
    }
}

fn positions(model: &ShelfModel) -> Vec<Option<usize>> {
    model
        .visible_slice()
        .iter()
        .map(Slot::logical_index)
        .collect()
}

fn tap(
    model: &mut ShelfModel,
    target: GestureTarget,
    at: Instant,
) -> Option<ShelfSignal> {
    model.contact_start(target, (10.0, 10.0), at);
    model.contact_end(at + Duration::from_millis(60))
}

#[test]
fn pages_through_nine_items_and_the_add_slot() {
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(9), RowMode::One),
        four_columns(),
    );
    let t0 = Instant::now();

    assert_eq!(positions(&m), vec![Some(0), Some(1), Some(2), Some(3)]);

    let nav = m.navigate(Direction::Next, t0);
    assert!(nav.moved);
    assert_eq!(positions(&m), vec![Some(4), Some(5), Some(6), Some(7)]);

    let nav = m.navigate(Direction::Next, t0);
    assert_eq!(nav.offset, 8);
    assert_eq!(nav.visible, vec![
        Slot::Real {
            index: 8,
            resource: "/covers/8.png".into()
        },
        Slot::AddSlot,
    ]);

    let nav = m.navigate(Direction::Next, t0);
    assert!(!nav.moved);
    assert_eq!(nav.offset, 8);
    assert_eq!(nav.bounce.kind, TimerKind::Bounce(Direction::Next));
    assert!(m.is_bouncing(Direction::Next, t0 + Duration::from_millis(10)));

    let d = m.directives(t0);
    assert!(!d.can_next);
    assert!(d.can_prev);
    assert_eq!(d.page, 2);
    assert_eq!(d.page_count, 3);
}

#[test]
fn add_slot_is_always_last_and_never_selected() {
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(3), RowMode::One),
        four_columns(),
    );
    let t0 = Instant::now();

    let last = m.state().slot_at(m.state().display_len() - 1);
    assert_eq!(last, Some(Slot::AddSlot));
    assert_eq!(
        last.as_ref().map(resolve),
        Some(AssetRef::AddMarker)
    );
    assert_eq!(AssetRef::AddMarker.as_str(), ADD_MARKER);

    assert_eq!(
        tap(&mut m, GestureTarget::Tile(3), t0),
        Some(ShelfSignal::AddRequested)
    );
    assert_eq!(m.state().selected_index(), None);
    assert!(!m.directives(t0).edit_enabled);
}

#[test]
fn selection_survives_paging_and_density_changes() {
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(12), RowMode::One),
        four_columns(),
    );
    let t0 = Instant::now();

    assert_eq!(
        tap(&mut m, GestureTarget::Tile(2), t0),
        Some(ShelfSignal::ItemSelected(2))
    );
    m.navigate(Direction::Next, t0);
    m.set_row_mode(RowMode::Two);
    m.navigate(Direction::Prev, t0);
    assert_eq!(m.state().selected_index(), Some(2));

    let d = m.directives(t0);
    assert!(d.edit_enabled);
    let selected: Vec<usize> = d
        .visible
        .iter()
        .filter(|tile| tile.selected)
        .map(|tile| tile.position)
        .collect();
    assert_eq!(selected, vec![2]);
}

#[test]
fn density_change_keeps_offset_within_bounds() {
    // 19 items + add slot.
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(19), RowMode::One),
        four_columns(),
    );
    let t0 = Instant::now();
    for _ in 0..4 {
        m.navigate(Direction::Next, t0);
    }
    assert_eq!(m.state().scroll_offset(), 16);

    m.set_row_mode(RowMode::Two);
    assert_eq!(m.state().scroll_offset(), 12);
    assert_eq!(m.visible_slice().len(), 8);
    assert_eq!(m.visible_slice().last(), Some(&Slot::AddSlot));
}

#[test]
fn drag_past_tolerance_produces_nothing() {
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(5), RowMode::One),
        four_columns(),
    );
    let t0 = Instant::now();
    let ms = Duration::from_millis;

    let request = m.contact_start(GestureTarget::Tile(1), (0.0, 0.0), t0);
    assert_eq!(m.contact_move((4.0, 3.0), t0 + ms(20)), None);
    assert!(m.pending_long_press().is_some());
    assert_eq!(m.contact_move((30.0, 0.0), t0 + ms(40)), None);
    assert_eq!(m.pending_long_press(), None);

    assert_eq!(m.timer_fired(request.kind, request.token, request.deadline), None);
    assert_eq!(m.contact_end(t0 + ms(700)), None);
    assert_eq!(m.state().selected_index(), None);
}

#[test]
fn headless_updates_drive_the_same_contract() {
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(6), RowMode::One),
        four_columns(),
    );
    let t0 = Instant::now();
    let ms = Duration::from_millis;

    let out = update(
        &mut m,
        ShelfMessage::ContactStart {
            target: GestureTarget::Tile(5),
            x: 0.0,
            y: 0.0,
        },
        t0,
    );
    assert_eq!(out.timers.len(), 1);

    let out = update(&mut m, ShelfMessage::Tick, t0 + ms(499));
    assert!(out.signals.is_empty());
    let out = update(&mut m, ShelfMessage::Tick, t0 + ms(500));
    assert_eq!(out.signals, vec![ShelfSignal::ItemLongPressed(5)]);

    let out = update(&mut m, ShelfMessage::ContactEnd, t0 + ms(520));
    assert!(out.signals.is_empty());
    assert_eq!(m.state().selected_index(), Some(5));

    let out = update(
        &mut m,
        ShelfMessage::SetCollection {
            items: covers(2),
            add_slot: true,
        },
        t0 + ms(600),
    );
    assert!(out.signals.is_empty());
    assert_eq!(m.state().selected_index(), None);
}

#[test]
fn page_stays_in_range_after_an_unaligned_restore() {
    // 19 items + add slot, 8 slots per page.
    let mut m = ShelfModel::new(
        ShelfOptions::new(covers(19), RowMode::Two),
        four_columns(),
    );
    let t0 = Instant::now();
    m.restore_scroll_offset(10);
    assert_eq!(m.directives(t0).page, 2);

    let nav = m.navigate(Direction::Next, t0);
    assert_eq!(nav.offset, 18);
    assert_eq!(nav.visible.len(), 2);

    let d = m.directives(t0);
    assert_eq!(d.page_count, 3);
    assert_eq!(d.page, 2);
    assert!(!d.can_next);
}

#[test]
fn oversized_column_counts_do_not_overflow() {
    let config = ShelfConfig {
        columns: Some(usize::MAX),
        ..ShelfConfig::default()
    };
    let m =
        ShelfModel::new(ShelfOptions::new(covers(3), RowMode::Two), config);
    assert_eq!(m.windower().columns(), MAX_COLUMNS);
    assert_eq!(m.visible_slice().len(), 4);

    let d = m.directives(Instant::now());
    assert_eq!(d.page_count, 1);
    assert_eq!(d.page, 0);
}
