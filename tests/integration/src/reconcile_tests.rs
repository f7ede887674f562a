//! End-to-end reconciliation scenarios
//!
//! These exercise the complete flow on a realistic project layout:
//! fetch -> index -> extract -> merge -> render -> write.

use std::sync::Arc;

use async_trait::async_trait;
use dsync_blocks::Anchor;
use dsync_core::{
    ArtifactKind, DefinitionSource, DesignService, RemoteError, SyncEngine, SyncOptions,
};
use dsync_test_utils::TestProject;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Serves a fixed response per artifact kind.
struct FixedService {
    style: Value,
    theme: Value,
    config: Value,
}

#[async_trait]
impl DesignService for FixedService {
    async fn fetch(&self, kind: ArtifactKind, _id: &str) -> Result<Value, RemoteError> {
        Ok(match kind {
            ArtifactKind::Style => self.style.clone(),
            ArtifactKind::Theme => self.theme.clone(),
            ArtifactKind::Config => self.config.clone(),
        })
    }

    async fn clear(&self, _kind: ArtifactKind, _id: &str, _checksum: &str) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn fetch_stylesheet(&self, _id: &str) -> Result<Option<String>, RemoteError> {
        Ok(None)
    }
}

/// A small app with hand-written component files in several folders.
fn setup_project() -> TestProject {
    let project = TestProject::new();

    project.write_file(
        "src/components/card/card.sf.ts",
        r#"import { createStyle } from '@splitflow/designer/style'

// Card layout, tuned by hand
export const style = createStyle('card', {
    root: {
        padding: { top: 0 },
        color: 'red',
        shadow: 'rgba(0, 0, 0, 0.5)'
    },
    title: { font: "Open Sans" }
})
"#,
    );
    project.write_component(
        "src/components/menu/menu.sf.js",
        "createStyle",
        "menu",
        "{}",
    );
    project.write_component(
        "src/theme/main.sft.ts",
        "createTheme",
        "main",
        "{primary: '#000', accent: '#f00'}",
    );
    project.write_component(
        "src/components/menu/menu.sfc.ts",
        "createConfig",
        "menu",
        "{size: 'small', variant: 'flat'}",
    );
    project.write_component(
        "node_modules/lib/card.sf.ts",
        "createStyle",
        "card",
        "{}",
    );

    project
}

fn service() -> Arc<FixedService> {
    Arc::new(FixedService {
        style: json!({
            "card-root": {"padding": {"top": 5}},
            "card-title": {"weight": 700},
            "menu-item": {"gap": 4},
            "badge-root": {"gap": 1}
        }),
        theme: json!({"main": {"accent": "#0f0"}}),
        config: json!({"menu": {"size": "large", "variant": null}}),
    })
}

fn embedded(project: &TestProject, rel: &str, factory: &str) -> Value {
    Anchor::new(factory)
        .unwrap()
        .extract_definition(&project.read_file(rel))
        .unwrap()
}

async fn sync(project: &TestProject, kind: ArtifactKind) -> dsync_core::SyncReport {
    let service: Arc<dyn DesignService> = service();
    SyncEngine::new(project.root(), kind)
        .unwrap()
        .with_service(service)
        .sync(
            &DefinitionSource::Remote { id: "acme".into() },
            SyncOptions::default(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_style_round_trip_on_hand_written_file() {
    let project = setup_project();

    let report = sync(&project, ArtifactKind::Style).await;

    assert_eq!(report.updated, vec!["card", "menu"]);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].key, "badge");
    assert!(report.is_success());
    assert_eq!(
        embedded(&project, "src/components/card/card.sf.ts", "createStyle"),
        json!({
            "root": {
                "padding": {"top": 5},
                "color": "red",
                "shadow": "rgba(0, 0, 0, 0.5)"
            },
            "title": {"font": "Open Sans", "weight": 700}
        })
    );
    assert_eq!(
        embedded(&project, "src/components/menu/menu.sf.js", "createStyle"),
        json!({"item": {"gap": 4}})
    );
}

#[tokio::test]
async fn test_node_modules_untouched() {
    let project = setup_project();
    let vendored = project.read_file("node_modules/lib/card.sf.ts");

    sync(&project, ArtifactKind::Style).await;

    assert_eq!(project.read_file("node_modules/lib/card.sf.ts"), vendored);
}

#[tokio::test]
async fn test_theme_keeps_unmentioned_values() {
    let project = setup_project();

    let report = sync(&project, ArtifactKind::Theme).await;

    assert_eq!(report.updated, vec!["main"]);
    assert_eq!(
        embedded(&project, "src/theme/main.sft.ts", "createTheme"),
        json!({"primary": "#000", "accent": "#0f0"})
    );
}

#[tokio::test]
async fn test_config_drops_deleted_properties() {
    let project = setup_project();

    sync(&project, ArtifactKind::Config).await;

    assert_eq!(
        embedded(&project, "src/components/menu/menu.sfc.ts", "createConfig"),
        json!({"size": "large"})
    );
    // The style file of the same component is a different kind
    assert_eq!(
        embedded(&project, "src/components/menu/menu.sf.js", "createStyle"),
        json!({})
    );
}

#[tokio::test]
async fn test_repeated_runs_are_idempotent() {
    let project = setup_project();

    sync(&project, ArtifactKind::Style).await;
    let first = project.read_file("src/components/card/card.sf.ts");
    let report = sync(&project, ArtifactKind::Style).await;

    assert_eq!(project.read_file("src/components/card/card.sf.ts"), first);
    assert_eq!(report.unchanged, vec!["card", "menu"]);
    assert!(report.updated.is_empty());
}

#[tokio::test]
async fn test_kinds_run_concurrently_on_one_project() {
    let project = setup_project();

    let (style, theme, config) = tokio::join!(
        sync(&project, ArtifactKind::Style),
        sync(&project, ArtifactKind::Theme),
        sync(&project, ArtifactKind::Config),
    );

    assert!(style.is_success() && theme.is_success() && config.is_success());
    assert_eq!(
        embedded(&project, "src/theme/main.sft.ts", "createTheme")["accent"],
        json!("#0f0")
    );
}
