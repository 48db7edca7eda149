use async_trait::async_trait;
use std::fmt::Write;
use tracing::{debug, info};

use crate::api::AdminApi;
use crate::error::ClientResult;
use crate::models::{ByIdRequest, Tag, UpdateTagRequest};
use crate::route::{parse_leading_int, RouteParams};
use crate::state::AppContext;
use crate::view::{
    field_views, update_field, Editable, FieldSpec, FieldView, LoadOutcome, MutationSubmitter,
    Resource, ResourceLoader, SubmissionState, SubmitOutcome, ViewScope,
};

pub struct TagResource;

#[async_trait]
impl Resource for TagResource {
    type Value = Tag;

    fn name(&self) -> &'static str {
        "tag"
    }

    async fn fetch(&self, api: &dyn AdminApi, id: Option<i64>) -> ClientResult<Tag> {
        Ok(api.get_tag_info(&ByIdRequest { id }).await?.tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Id,
    Name,
    Description,
}

impl TagField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(TagField::Id),
            "name" => Some(TagField::Name),
            "description" => Some(TagField::Description),
            _ => None,
        }
    }
}

impl Editable for Tag {
    type Field = TagField;

    fn fields() -> &'static [TagField] {
        &[TagField::Id, TagField::Name, TagField::Description]
    }

    fn spec(field: TagField) -> FieldSpec {
        match field {
            TagField::Id => FieldSpec {
                label: "ID",
                name: "id",
                read_only: true,
                multiline: false,
            },
            TagField::Name => FieldSpec {
                label: "Name",
                name: "name",
                read_only: false,
                multiline: false,
            },
            TagField::Description => FieldSpec {
                label: "Description",
                name: "description",
                read_only: false,
                multiline: true,
            },
        }
    }

    fn field_value(&self, field: TagField) -> String {
        match field {
            TagField::Id => self.id.map(|id| id.to_string()).unwrap_or_default(),
            TagField::Name => self.name.clone(),
            TagField::Description => self.description.clone(),
        }
    }

    fn with_field(&self, field: TagField, value: &str) -> Self {
        match field {
            TagField::Id => Tag {
                id: parse_leading_int(value),
                ..self.clone()
            },
            TagField::Name => Tag {
                name: value.to_string(),
                ..self.clone()
            },
            TagField::Description => Tag {
                description: value.to_string(),
                ..self.clone()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saving is switched off; nothing was sent.
    Disabled,
    Saved,
    Rejected(String),
    Busy,
}

/// Edit form for one tag.
pub struct TagEditorPage {
    ctx: AppContext,
    scope: ViewScope,
    loader: ResourceLoader<TagResource>,
    saver: MutationSubmitter,
}

impl TagEditorPage {
    pub fn new(ctx: AppContext, route: &RouteParams) -> Self {
        let scope = ViewScope::new("tag editor");
        let loader = ResourceLoader::new(TagResource, ctx.clone(), route.id(), scope.clone());
        let saver = MutationSubmitter::new("tag update", ctx.clone(), scope.clone());

        Self {
            ctx,
            scope,
            loader,
            saver,
        }
    }

    pub async fn mount(&self) -> ClientResult<LoadOutcome> {
        self.loader.mount().await
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub async fn tag(&self) -> Tag {
        self.loader.snapshot().await
    }

    pub async fn fields(&self) -> Vec<FieldView> {
        field_views(&self.tag().await)
    }

    /// Applies one input change to the local copy. The id input is disabled,
    /// so edits to it are refused.
    pub async fn edit(&self, field: TagField, value: &str) -> ClientResult<()> {
        self.loader
            .update(|tag| update_field(tag, field, value))
            .await
    }

    pub fn save_state(&self) -> SubmissionState {
        self.saver.state()
    }

    pub async fn save(&self) -> ClientResult<SaveOutcome> {
        if !self.ctx.config.enable_tag_save {
            debug!("Tag save is disabled, nothing sent");
            return Ok(SaveOutcome::Disabled);
        }

        let request = UpdateTagRequest::from(&self.tag().await);
        info!("Saving tag {:?}", request.id);

        let outcome = self
            .saver
            .submit(self.ctx.api.update_tag(&request), || async {})
            .await?;

        Ok(match outcome {
            SubmitOutcome::Accepted => SaveOutcome::Saved,
            SubmitOutcome::Rejected(message) => SaveOutcome::Rejected(message),
            SubmitOutcome::Busy => SaveOutcome::Busy,
        })
    }

    pub async fn render(&self) -> String {
        let mut out = String::from("Edit Tag\n");
        for field in self.fields().await {
            let suffix = if field.disabled { " (read-only)" } else { "" };
            if field.multiline {
                let _ = writeln!(out, "{}{}:", field.label, suffix);
                for line in field.value.lines() {
                    let _ = writeln!(out, "  {}", line);
                }
            } else {
                let _ = writeln!(out, "{}{}: {}", field.label, suffix, field.value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ClientError;
    use crate::notify::RecordingNotifier;
    use crate::testing::MockApi;
    use serde_json::json;
    use std::sync::Arc;

    const JAZZ: &str = r#"{"tag":{"id":3,"name":"jazz","description":"swing\nbebop"}}"#;

    fn page_with(config: Config, id: &str) -> (TagEditorPage, Arc<MockApi>, Arc<RecordingNotifier>) {
        let api = Arc::new(MockApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = AppContext::new(config, api.clone(), notifier.clone());
        let page = TagEditorPage::new(ctx, &RouteParams::new().with("id", id));
        (page, api, notifier)
    }

    #[tokio::test]
    async fn test_mount_fills_every_field() {
        let (page, api, _) = page_with(Config::default(), "3");
        api.reply("get_tag_info", JAZZ);

        assert_eq!(page.mount().await.unwrap(), LoadOutcome::Applied);

        assert_eq!(api.calls_to("get_tag_info"), vec![json!({ "id": 3 })]);
        let values: Vec<(String, String, bool)> = page
            .fields()
            .await
            .into_iter()
            .map(|f| (f.name, f.value, f.disabled))
            .collect();
        assert_eq!(
            values,
            vec![
                ("id".to_string(), "3".to_string(), true),
                ("name".to_string(), "jazz".to_string(), false),
                ("description".to_string(), "swing\nbebop".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_unparsable_route_id_is_sent_as_null() {
        let (page, api, _) = page_with(Config::default(), "latest");
        page.mount().await.unwrap();
        assert_eq!(api.calls_to("get_tag_info"), vec![json!({ "id": null })]);
    }

    #[tokio::test]
    async fn test_edit_changes_only_that_field() {
        let (page, api, _) = page_with(Config::default(), "3");
        api.reply("get_tag_info", JAZZ);
        page.mount().await.unwrap();
        let before = page.tag().await;

        page.edit(TagField::Name, "cool jazz").await.unwrap();
        let after = page.tag().await;

        assert_eq!(after.name, "cool jazz");
        assert_eq!(after.id, before.id);
        assert_eq!(after.description, before.description);

        page.edit(TagField::Description, "").await.unwrap();
        let after = page.tag().await;
        assert_eq!(after.description, "");
        assert_eq!(after.name, "cool jazz");
    }

    #[tokio::test]
    async fn test_id_field_is_read_only() {
        let (page, api, _) = page_with(Config::default(), "3");
        api.reply("get_tag_info", JAZZ);
        page.mount().await.unwrap();

        let err = page.edit(TagField::Id, "99").await.unwrap_err();
        assert!(matches!(err, ClientError::ReadOnlyField(ref name) if name == "id"));
        assert_eq!(page.tag().await.id, Some(3));
    }

    #[tokio::test]
    async fn test_save_disabled_sends_nothing() {
        let (page, api, notifier) = page_with(Config::default(), "3");
        api.reply("get_tag_info", JAZZ);
        page.mount().await.unwrap();
        page.edit(TagField::Name, "fusion").await.unwrap();
        let before = page.tag().await;

        assert_eq!(page.save().await.unwrap(), SaveOutcome::Disabled);

        assert_eq!(api.calls().len(), 1);
        assert_eq!(page.tag().await, before);
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_save_enabled_posts_update_tag() {
        let config = Config {
            enable_tag_save: true,
            ..Config::default()
        };
        let (page, api, notifier) = page_with(config, "3");
        api.reply("get_tag_info", JAZZ);
        api.reply("update_tag", "{}");
        api.reply("update_tag", r#"{"error":"name taken"}"#);
        page.mount().await.unwrap();
        page.edit(TagField::Name, "fusion").await.unwrap();

        assert_eq!(page.save().await.unwrap(), SaveOutcome::Saved);
        assert_eq!(
            api.calls_to("update_tag"),
            vec![json!({ "id": 3, "name": "fusion", "description": "swing\nbebop" })]
        );

        assert_eq!(
            page.save().await.unwrap(),
            SaveOutcome::Rejected("name taken".to_string())
        );
        assert_eq!(page.tag().await.name, "fusion");
        assert_eq!(notifier.alerts(), vec!["name taken"]);
        assert_eq!(page.save_state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_load_error_alerts_and_leaves_form_blank() {
        let (page, api, notifier) = page_with(Config::default(), "404");
        api.reply("get_tag_info", r#"{"error":"tag not found"}"#);

        assert_eq!(
            page.mount().await.unwrap(),
            LoadOutcome::Rejected("tag not found".to_string())
        );
        assert_eq!(page.tag().await, Tag::default());
        assert_eq!(notifier.alerts(), vec!["tag not found"]);
    }

    #[tokio::test]
    async fn test_result_after_unmount_is_discarded() {
        let (page, api, notifier) = page_with(Config::default(), "3");
        let _gate = api.reply_gated("get_tag_info", JAZZ);
        let page = Arc::new(page);

        let pending = {
            let page = page.clone();
            tokio::spawn(async move { page.mount().await })
        };
        api.wait_for_calls(1).await;
        page.unmount();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(page.tag().await, Tag::default());
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_render() {
        let (page, api, _) = page_with(Config::default(), "3");
        api.reply("get_tag_info", JAZZ);
        page.mount().await.unwrap();

        assert_eq!(
            page.render().await,
            "Edit Tag\nID (read-only): 3\nName: jazz\nDescription:\n  swing\n  bebop\n"
        );
    }
}
