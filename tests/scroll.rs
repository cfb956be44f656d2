use quizdance::scroll::{Geometry, ScrollAffordances, Trigger, TOP_THRESHOLD};

fn geometry(content: usize, viewport: usize, offset: usize) -> Geometry {
    Geometry {
        content_rows: content,
        viewport_rows: viewport,
        scroll_offset: offset,
    }
}

#[test]
fn test_sticky_iff_content_taller_than_viewport() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(40, 20, 0));
    assert!(aff.is_sticky());

    aff.mark_dirty(Trigger::Resize);
    aff.recompute(&geometry(15, 20, 0));
    assert!(!aff.is_sticky());

    // Exactly filling the viewport leaves nothing to scroll.
    aff.mark_dirty(Trigger::Resize);
    aff.recompute(&geometry(20, 20, 0));
    assert!(!aff.is_sticky());
}

#[test]
fn test_hint_visible_at_top_of_scrollable_page() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(40, 20, 0));
    assert!(aff.hint_visible());
}

#[test]
fn test_hint_hidden_when_not_scrollable() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(10, 20, 0));
    assert!(!aff.hint_visible());
}

#[test]
fn test_hint_disarms_after_scrolling_past_threshold() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(40, 20, 0));
    assert!(aff.hint_visible());

    aff.mark_dirty(Trigger::Scroll);
    aff.recompute(&geometry(40, 20, TOP_THRESHOLD + 3));
    assert!(!aff.hint_visible());

    // Back near the top: still hidden until a fresh screen re-arms it.
    aff.mark_dirty(Trigger::Scroll);
    aff.recompute(&geometry(40, 20, 0));
    assert!(!aff.hint_visible());
}

#[test]
fn test_rearm_restores_the_hint() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(40, 20, 0));
    aff.mark_dirty(Trigger::Scroll);
    aff.recompute(&geometry(40, 20, 10));
    assert!(!aff.hint_visible());

    aff.rearm();
    aff.recompute(&geometry(40, 20, 0));
    assert!(aff.hint_visible());
}

#[test]
fn test_image_load_can_reveal_the_hint() {
    // Page starts short; an image finishing its probe grows the content
    // while the user is still at the top.
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(15, 20, 0));
    assert!(!aff.hint_visible());
    assert!(!aff.is_sticky());

    aff.mark_dirty(Trigger::ImageLoaded);
    aff.recompute(&geometry(35, 20, 0));
    assert!(aff.hint_visible());
    assert!(aff.is_sticky());
}

#[test]
fn test_marks_coalesce_into_one_dirty_flag() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(40, 20, 0));
    assert!(!aff.is_dirty());

    assert!(aff.mark_dirty(Trigger::Scroll));
    assert!(!aff.mark_dirty(Trigger::Resize));
    assert!(!aff.mark_dirty(Trigger::SettleCheck));
    assert!(aff.is_dirty());

    aff.recompute(&geometry(40, 20, 0));
    assert!(!aff.is_dirty());
}

#[test]
fn test_recompute_without_dirty_is_a_no_op() {
    let mut aff = ScrollAffordances::new();
    aff.recompute(&geometry(40, 20, 0));
    assert!(aff.is_sticky());

    // Geometry changed but nothing marked the controller dirty: the stale
    // decision stands until the next trigger.
    aff.recompute(&geometry(5, 20, 0));
    assert!(aff.is_sticky());
}

#[test]
fn test_nudge_is_seventy_percent_of_viewport() {
    assert_eq!(ScrollAffordances::nudge(20), 14);
    assert_eq!(ScrollAffordances::nudge(10), 7);
    assert_eq!(ScrollAffordances::nudge(1), 1);
    assert_eq!(ScrollAffordances::nudge(0), 1);
}
