//! The profile card.
//!
//! ```text
//!  ┌───────────── completeProfileBox (200×200) ─────────────┐
//!  │ headerBox:  [avatar]  Username                          │
//!  │                       @username123                      │
//!  ├──────────────────── descriptionBox ─────────────────────┤
//!  │              ┌──────── textBox ────────┐                │
//!  │              │ description             │                │
//!  │              └─────────────────────────┘                │
//!  └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The name, handle and avatar are fixed placeholders. Only the
//! description comes from props.

use cardkit_core::{Align, BoxStyle, Color, Element, FontWeight, Length, TextProps, WrapMode};

use crate::component::{Component, HostTree};
use crate::fit::{FitDecision, FitPolicy};

/// Element id of the box whose rendered text is measured after mount.
pub const TEXT_BOX_ID: &str = "textBox";

pub const PROFILE_BOX_ID: &str = "completeProfileBox";
pub const HEADER_BOX_ID: &str = "headerBox";
pub const USERNAME_BOX_ID: &str = "usernameBox";
pub const DESCRIPTION_BOX_ID: &str = "descriptionBox";

pub const DISPLAY_NAME: &str = "Username";
pub const HANDLE: &str = "@username123";
pub const AVATAR_SRC: &str = "img/profile-thumbnail.png";
pub const AVATAR_ALT: &str = "profile";

const PAGE_BACKGROUND: Color = Color::rgb(254, 242, 242);
const CARD_BACKGROUND: Color = Color::rgb(219, 234, 254);
const HEADER_BACKGROUND: Color = Color::rgb(220, 252, 231);
const TEXT_BOX_BACKGROUND: Color = Color::rgb(255, 237, 213);
const HANDLE_COLOR: Color = Color::rgb(156, 163, 175);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileCardProps {
    pub description: String,
}

impl ProfileCardProps {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Where the card is in its one-time fit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitState {
    /// Not mounted yet.
    Pending,
    /// Checked; the description fit.
    Fits,
    /// Checked; the displayed description was shortened.
    Truncated,
    /// Checked; the text box could not be inspected, nothing changed.
    TargetMissing,
}

#[derive(Debug, Clone)]
pub struct ProfileCard {
    props: ProfileCardProps,
    displayed: String,
    fit: FitState,
    policy: FitPolicy,
}

impl ProfileCard {
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_props(ProfileCardProps::new(description))
    }

    pub fn with_props(props: ProfileCardProps) -> Self {
        Self::with_policy(props, FitPolicy::STANDARD)
    }

    pub fn with_policy(props: ProfileCardProps, policy: FitPolicy) -> Self {
        Self {
            displayed: props.description.clone(),
            props,
            fit: FitState::Pending,
            policy,
        }
    }

    /// The most recently supplied props.
    pub fn props(&self) -> &ProfileCardProps {
        &self.props
    }

    /// Text the card currently shows in its text box.
    pub fn displayed_description(&self) -> &str {
        &self.displayed
    }

    pub fn fit_state(&self) -> FitState {
        self.fit
    }

    fn header(&self) -> Element {
        let avatar = Element::image(
            AVATAR_SRC,
            AVATAR_ALT,
            BoxStyle::default()
                .size(Length::Px(40.0), Length::Px(40.0))
                .margin_left(8.0)
                .no_shrink(),
        );
        let identity = Element::container(BoxStyle::column().grow(1.0))
            .with_id(USERNAME_BOX_ID)
            .child(Element::text(
                TextProps::new(DISPLAY_NAME).weight(FontWeight::Semibold),
            ))
            .child(Element::text(TextProps::new(HANDLE).color(HANDLE_COLOR)));

        Element::container(
            BoxStyle::row()
                .size(Length::FULL, Length::Px(60.0))
                .align(Align::Center)
                .gap(8.0)
                .background(HEADER_BACKGROUND),
        )
        .with_id(HEADER_BOX_ID)
        .child(avatar)
        .child(identity)
    }

    fn description(&self) -> Element {
        let text_box = Element::container(
            BoxStyle::default()
                .size(Length::Percent(0.9), Length::Percent(0.8))
                .background(TEXT_BOX_BACKGROUND),
        )
        .with_id(TEXT_BOX_ID)
        .child(Element::text(
            TextProps::new(self.displayed.as_str()).wrap(WrapMode::BreakWord),
        ));

        Element::container(BoxStyle::row().flex(1.0).border(1.0, Color::BLACK).centered())
            .with_id(DESCRIPTION_BOX_ID)
            .child(text_box)
    }
}

impl Component for ProfileCard {
    type Props = ProfileCardProps;

    fn render(&self) -> Element {
        let card = Element::container(
            BoxStyle::column()
                .size(Length::Px(200.0), Length::Px(200.0))
                .background(CARD_BACKGROUND)
                .rounded(6.0),
        )
        .with_id(PROFILE_BOX_ID)
        .child(self.header())
        .child(self.description());

        let stage = Element::container(
            BoxStyle::row()
                .size(Length::FULL, Length::Px(600.0))
                .centered(),
        )
        .child(card);

        Element::container(
            BoxStyle::default()
                .size(Length::FULL, Length::FULL)
                .padding_x(24.0)
                .background(PAGE_BACKGROUND),
        )
        .child(stage)
    }

    fn mounted(&mut self, host: &dyn HostTree) -> bool {
        if self.fit != FitState::Pending {
            return false;
        }

        let measured = host
            .inner_text_of(TEXT_BOX_ID)
            .map(|text| text.chars().count());

        // Cut from the description that was rendered and measured, which
        // may differ from props supplied since construction.
        match self.policy.decide(measured, &self.displayed) {
            FitDecision::Fits => {
                self.fit = FitState::Fits;
                false
            }
            FitDecision::Truncate(shortened) => {
                log::info!(
                    "Description too long ({} chars rendered), showing {shortened:?}",
                    measured.unwrap_or_default()
                );
                self.displayed = shortened;
                self.fit = FitState::Truncated;
                true
            }
            FitDecision::TargetMissing => {
                log::warn!("No #{TEXT_BOX_ID} element to measure, description left as is");
                self.fit = FitState::TargetMissing;
                false
            }
        }
    }

    fn unmounted(&mut self) {
        self.displayed = self.props.description.clone();
        self.fit = FitState::Pending;
    }

    fn set_props(&mut self, props: ProfileCardProps) {
        self.props = props;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DetachedHost;
    use cardkit_core::{Document, NodeKind};

    /// Commit the card's first render into a fresh document.
    fn committed(card: &ProfileCard) -> Document {
        let mut doc = Document::default();
        let root = doc.root_id();
        doc.commit(root, None, &card.render()).unwrap();
        doc
    }

    #[test]
    fn test_render_structure() {
        let card = ProfileCard::new("Hi there");
        let element = card.render();
        assert_eq!(
            element.element_ids(),
            vec![
                PROFILE_BOX_ID,
                HEADER_BOX_ID,
                USERNAME_BOX_ID,
                DESCRIPTION_BOX_ID,
                TEXT_BOX_ID
            ]
        );

        let doc = committed(&card);
        assert_eq!(doc.inner_text_of(USERNAME_BOX_ID).as_deref(), Some("Username\n@username123"));
        assert_eq!(doc.inner_text_of(TEXT_BOX_ID).as_deref(), Some("Hi there"));

        let header = doc.find_by_element_id(HEADER_BOX_ID).unwrap();
        let avatar = doc.get_node(&doc.children(&header.id)[0]).unwrap();
        assert_eq!(
            avatar.kind,
            NodeKind::Image {
                src: AVATAR_SRC.to_string(),
                alt: AVATAR_ALT.to_string()
            }
        );
    }

    #[test]
    fn test_short_description_unchanged() {
        let mut card = ProfileCard::new("Hi there");
        let doc = committed(&card);
        assert!(!card.mounted(&doc));
        assert_eq!(card.displayed_description(), "Hi there");
        assert_eq!(card.fit_state(), FitState::Fits);
    }

    #[test]
    fn test_long_description_truncated() {
        let mut card = ProfileCard::new("Software engineer based in the city");
        let doc = committed(&card);
        assert!(card.mounted(&doc));
        assert_eq!(card.displayed_description(), "Software engineer base...");
        assert_eq!(card.fit_state(), FitState::Truncated);
        // Props keep the full text.
        assert_eq!(card.props().description, "Software engineer based in the city");
    }

    #[test]
    fn test_empty_description() {
        let mut card = ProfileCard::new("");
        let doc = committed(&card);
        assert!(!card.mounted(&doc));
        assert_eq!(card.displayed_description(), "");
        assert_eq!(card.fit_state(), FitState::Fits);
    }

    #[test]
    fn test_detached_host_leaves_description() {
        let mut card = ProfileCard::new("Software engineer based in the city");
        assert!(!card.mounted(&DetachedHost));
        assert_eq!(card.displayed_description(), "Software engineer based in the city");
        assert_eq!(card.fit_state(), FitState::TargetMissing);
    }

    #[test]
    fn test_fit_check_runs_once() {
        let mut card = ProfileCard::new("Hi there");
        let doc = committed(&card);
        assert!(!card.mounted(&doc));

        card.set_props(ProfileCardProps::new("A much longer description than fits"));
        let doc = committed(&card);
        assert!(!card.mounted(&doc));
        assert_eq!(card.displayed_description(), "Hi there");
        assert_eq!(card.fit_state(), FitState::Fits);
    }

    #[test]
    fn test_props_replaced_before_mount_do_not_mix() {
        let mut card = ProfileCard::new("Software engineer based in the city");
        card.set_props(ProfileCardProps::new("ab"));
        let doc = committed(&card);

        assert!(card.mounted(&doc));
        assert_eq!(card.displayed_description(), "Software engineer base...");
    }

    #[test]
    fn test_unmounted_resets_to_current_props() {
        let mut card = ProfileCard::new("Software engineer based in the city");
        let doc = committed(&card);
        assert!(card.mounted(&doc));

        card.set_props(ProfileCardProps::new("Hi there"));
        card.unmounted();
        assert_eq!(card.fit_state(), FitState::Pending);
        assert_eq!(card.displayed_description(), "Hi there");

        let doc = committed(&card);
        assert!(!card.mounted(&doc));
        assert_eq!(card.fit_state(), FitState::Fits);
    }

    #[test]
    fn test_set_props_keeps_displayed_text() {
        let mut card = ProfileCard::new("Hi there");
        card.set_props(ProfileCardProps::new("Something else"));
        assert_eq!(card.props().description, "Something else");
        assert_eq!(card.displayed_description(), "Hi there");
    }
}
