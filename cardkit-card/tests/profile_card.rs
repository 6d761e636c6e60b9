//! End-to-end tests: mount a profile card into a host page and check what
//! the page ends up showing.

use cardkit_card::profile_card::{DESCRIPTION_BOX_ID, HEADER_BOX_ID, PROFILE_BOX_ID};
use cardkit_card::{
    Component, FitState, HostConfig, HostPage, MountHandle, ProfileCard, ProfileCardProps,
    TEXT_BOX_ID,
};
use cardkit_render::DisplayItem;
use uuid::Uuid;

const LONG: &str = "Software engineer based in the city";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mount(description: &str) -> (HostPage<ProfileCard>, MountHandle) {
    init_logging();
    let mut page = HostPage::default();
    let handle = page.mount(ProfileCard::new(description)).unwrap();
    (page, handle)
}

fn shown(page: &HostPage<ProfileCard>) -> String {
    page.inner_text_of(TEXT_BOX_ID).unwrap()
}

/// The paragraph node inside the text box.
fn paragraph(page: &HostPage<ProfileCard>) -> Uuid {
    let doc = page.document();
    let text_box = doc.find_by_element_id(TEXT_BOX_ID).unwrap();
    doc.children(&text_box.id)[0]
}

#[test]
fn test_short_description_shown_in_full() {
    let (page, handle) = mount("Hi there");
    assert_eq!(shown(&page), "Hi there");
    assert_eq!(page.component(handle).unwrap().fit_state(), FitState::Fits);
}

#[test]
fn test_long_description_truncated() {
    let (page, handle) = mount(LONG);
    assert_eq!(shown(&page), "Software engineer base...");
    assert_eq!(shown(&page).chars().count(), 25);

    let card = page.component(handle).unwrap();
    assert_eq!(card.displayed_description(), "Software engineer base...");
    assert_eq!(card.props().description, LONG);
}

#[test]
fn test_exactly_threshold_is_kept() {
    let exact = "abcdefghijklmnopqrstuvwxy";
    assert_eq!(exact.chars().count(), 25);
    let (page, _) = mount(exact);
    assert_eq!(shown(&page), exact);
}

#[test]
fn test_one_over_threshold_is_cut() {
    let over = "abcdefghijklmnopqrstuvwxyz";
    let (page, _) = mount(over);
    assert_eq!(shown(&page), "abcdefghijklmnopqrstuv...");
}

#[test]
fn test_empty_description() {
    let (page, handle) = mount("");
    assert_eq!(shown(&page), "");
    assert_eq!(page.component(handle).unwrap().fit_state(), FitState::Fits);
    assert!(page.display_list().lines_of(paragraph(&page)).is_empty());
}

#[test]
fn test_measures_rendered_text_not_props() {
    // Collapses to "a b c d e f g h i j k l m" (25 chars) when rendered.
    let spaced = "a  b  c  d  e  f  g  h  i  j  k  l  m";
    assert!(spaced.chars().count() > 25);

    let (page, handle) = mount(spaced);
    assert_eq!(page.component(handle).unwrap().fit_state(), FitState::Fits);
    assert_eq!(shown(&page), "a b c d e f g h i j k l m");
    assert_eq!(
        page.component(handle).unwrap().displayed_description(),
        spaced
    );
}

#[test]
fn test_truncation_counts_characters() {
    let accented = "é".repeat(30);
    let (page, _) = mount(&accented);
    assert_eq!(shown(&page), format!("{}...", "é".repeat(22)));
}

#[test]
fn test_detached_host_keeps_full_text() {
    init_logging();
    let mut page = HostPage::detached(HostConfig::default()).unwrap();
    let handle = page.mount(ProfileCard::new(LONG)).unwrap();

    assert_eq!(shown(&page), LONG);
    assert_eq!(
        page.component(handle).unwrap().fit_state(),
        FitState::TargetMissing
    );
}

#[test]
fn test_new_props_never_refit() {
    let (mut page, handle) = mount("Hi there");
    page.update(handle, ProfileCardProps::new(LONG)).unwrap();
    page.update(handle, ProfileCardProps::new("x".repeat(80))).unwrap();

    assert_eq!(shown(&page), "Hi there");
    let card = page.component(handle).unwrap();
    assert_eq!(card.fit_state(), FitState::Fits);
    assert_eq!(card.props().description, "x".repeat(80));
}

#[test]
fn test_truncated_card_stays_truncated_after_update() {
    let (mut page, handle) = mount(LONG);
    page.update(handle, ProfileCardProps::new("short")).unwrap();
    assert_eq!(shown(&page), "Software engineer base...");
}

#[test]
fn test_instances_are_independent() {
    let (first, a) = mount(LONG);
    let (second, b) = mount("Hi there");

    assert_eq!(shown(&first), "Software engineer base...");
    assert_eq!(shown(&second), "Hi there");
    assert_eq!(first.component(a).unwrap().fit_state(), FitState::Truncated);
    assert_eq!(second.component(b).unwrap().fit_state(), FitState::Fits);
}

#[test]
fn test_card_layout() {
    let (page, _) = mount("Hi there");

    // 24px page padding, card centered in a 600px stage.
    let card = page.bounds_of(PROFILE_BOX_ID).unwrap();
    assert_eq!(
        (card.x, card.y, card.width, card.height),
        (540.0, 200.0, 200.0, 200.0)
    );

    let header = page.bounds_of(HEADER_BOX_ID).unwrap();
    assert_eq!((header.x, header.y, header.width, header.height), (540.0, 200.0, 200.0, 60.0));

    let description = page.bounds_of(DESCRIPTION_BOX_ID).unwrap();
    assert_eq!(description.y, 260.0);
    assert_eq!(description.height, 140.0);

    // 90% x 80% of the 198x138 area inside the border, centered, then
    // snapped to whole pixels: 178.2 x 110.4 at (550.9, 274.8).
    let text_box = page.bounds_of(TEXT_BOX_ID).unwrap();
    assert_eq!(
        (text_box.x, text_box.y, text_box.width, text_box.height),
        (551.0, 275.0, 178.0, 110.0)
    );
    assert!(description.contains_rect(&text_box));
    assert!(card.contains_rect(&description));
}

#[test]
fn test_avatar_painted_in_header() {
    let (page, _) = mount("Hi there");
    let avatar = page
        .display_list()
        .items
        .iter()
        .find_map(|item| match item {
            DisplayItem::Image {
                bounds, src, alt, ..
            } => Some((*bounds, src.clone(), alt.clone())),
            _ => None,
        })
        .unwrap();

    assert_eq!(avatar.1, "img/profile-thumbnail.png");
    assert_eq!(avatar.2, "profile");
    assert_eq!(
        (avatar.0.x, avatar.0.y, avatar.0.width, avatar.0.height),
        (548.0, 210.0, 40.0, 40.0)
    );
}

#[test]
fn test_truncated_text_wraps_in_text_box() {
    let (page, _) = mount(LONG);
    assert_eq!(
        page.display_list().lines_of(paragraph(&page)),
        vec!["Software engineer", "base..."]
    );
}

#[test]
fn test_display_list_contents() {
    let (page, _) = mount("Hi there");
    let stats = page.stats();
    // Page, card, header and text box fills plus the description border.
    assert_eq!(stats.rect_count, 5);
    assert_eq!(stats.image_count, 1);
    // Name, handle and description.
    assert_eq!(stats.text_lines, 3);
}

#[test]
fn test_config_from_json_drives_layout() {
    init_logging();
    let config =
        HostConfig::from_json(r#"{ "viewport": { "width": 848, "height": 600 } }"#).unwrap();
    let mut page = HostPage::new(config).unwrap();
    page.mount(ProfileCard::new("Hi there")).unwrap();

    let card = page.bounds_of(PROFILE_BOX_ID).unwrap();
    assert_eq!((card.x, card.y), (324.0, 200.0));
}

#[test]
fn test_props_replaced_before_mount() {
    init_logging();
    let mut card = ProfileCard::new(LONG);
    card.set_props(ProfileCardProps::new("ab"));

    let mut page = HostPage::default();
    page.mount(card).unwrap();
    let text = shown(&page);
    assert!(text == LONG || text == "Software engineer base...", "showed {text:?}");
}

#[test]
fn test_unmounted_card_can_be_mounted_again() {
    let (mut page, handle) = mount(LONG);
    let mut card = page.unmount(handle).unwrap();
    assert_eq!(card.fit_state(), FitState::Pending);
    assert_eq!(card.displayed_description(), LONG);

    card.set_props(ProfileCardProps::new("Hi there"));
    let handle = page.mount(card).unwrap();
    assert_eq!(shown(&page), "Hi there");
    assert_eq!(page.component(handle).unwrap().fit_state(), FitState::Fits);
}
