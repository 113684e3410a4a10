//! End-to-end panel scenarios through the public API.

use std::sync::Arc;

use userinfos_panel::binding::{self, Action};
use userinfos_panel::gateway::FixtureGateway;
use userinfos_panel::panel::{FetchOutcome, PanelState, PropertyRow, UserInfoPanel};

fn gateway() -> Arc<FixtureGateway> {
    Arc::new(
        FixtureGateway::default()
            .with_rows("Microsoft", vec![PropertyRow::new("tenant", "contoso")])
            .with_rows(
                "Google",
                vec![
                    PropertyRow::new("sub", "1094"),
                    PropertyRow::new("email", "ada@example.com"),
                    PropertyRow::new("hd", "example.com"),
                ],
            )
            .with_rejection("Okta", "network unreachable"),
    )
}

#[tokio::test]
async fn microsoft_lookup_loads_tenant() {
    let panel = UserInfoPanel::new(gateway(), "Microsoft");

    assert_eq!(panel.fetch_user_infos().await, FetchOutcome::Loaded(1));

    assert_eq!(
        panel.snapshot(),
        PanelState {
            provider: "Microsoft".to_owned(),
            rows: vec![PropertyRow::new("tenant", "contoso")],
            busy: false,
            error_message: String::new(),
        }
    );
}

#[tokio::test]
async fn rejected_lookup_shows_message_and_keeps_rows() {
    let panel = UserInfoPanel::new(gateway(), "Microsoft");
    panel.fetch_user_infos().await;
    panel.set_provider("Okta");

    assert_eq!(panel.fetch_user_infos().await, FetchOutcome::Failed("network unreachable".to_owned()));

    let state = panel.snapshot();
    assert_eq!(state.error_message, "network unreachable");
    assert_eq!(state.rows, vec![PropertyRow::new("tenant", "contoso")]);
    assert!(!state.busy);
}

#[tokio::test]
async fn clear_after_three_rows_empties_immediately() {
    let panel = UserInfoPanel::new(gateway(), "Google");
    panel.fetch_user_infos().await;
    assert_eq!(panel.snapshot().rows.len(), 3);

    assert!(panel.clear_rows());
    assert!(panel.snapshot().rows.is_empty());
}

#[tokio::test]
async fn scripted_session_matches_direct_calls() {
    let panel = Arc::new(UserInfoPanel::new(gateway(), "Microsoft"));
    let actions = ["fetch", "provider Google", "fetch", "clear", "provider Okta", "fetch"]
        .into_iter()
        .map(Action::parse)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    binding::run_script(&panel, actions, |_| {}).await;

    let state = panel.snapshot();
    assert_eq!(state.provider, "Okta");
    assert!(state.rows.is_empty());
    assert_eq!(state.error_message, "network unreachable");
    assert!(!state.busy);
}
