//! # Business Hours Table
//!
//! Paged, filterable list of omnichannel business hours. Named (custom) hours
//! carry a remove action behind a confirmation; the default hour does not.

use crate::api::BusinessHoursList;
use crate::context::ViewContext;
use crate::model::{BusinessHour, BusinessHourType};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use view_framework::{
    AsyncPhase, Column, Endpoint, EndpointData, Gate, ListQuery, Page, QueryEdit, RemoteMethod, Route,
    RowAction, RowRenderer, RowTarget, Settled, TableModel, TablePresenter, Translate, View,
    ViewError,
};

pub const EDIT_ROUTE: &str = "omnichannel-businessHours";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHourRow {
    pub id: String,
    pub kind: BusinessHourType,
    pub name: String,
    pub timezone: String,
    pub open_days: String,
    pub enabled: String,
    /// Whether the row shows the remove button.
    pub removable: bool,
}

/// Renders rows with translated timezone, day and yes/no labels.
pub struct BusinessHourRows<'a> {
    translator: &'a dyn Translate,
}

impl<'a> BusinessHourRows<'a> {
    pub fn new(translator: &'a dyn Translate) -> Self {
        Self { translator }
    }
}

impl RowRenderer<BusinessHour> for BusinessHourRows<'_> {
    type Row = BusinessHourRow;

    fn columns(&self) -> Vec<Column> {
        let t = |key| self.translator.t(key);
        vec![
            Column::new("name", t("Name")),
            Column::new("timezone", t("Timezone")),
            Column::new("open_days", t("Open_Days")),
            Column::new("enabled", t("Enabled")).width("x100"),
            Column::new("remove", t("Remove")).width("x100"),
        ]
    }

    fn render_row(&self, hour: &BusinessHour) -> BusinessHourRow {
        let t = |key: &str| self.translator.t(key);
        BusinessHourRow {
            id: hour.id.clone(),
            kind: hour.kind,
            name: if hour.name.is_empty() {
                t("Default")
            } else {
                hour.name.clone()
            },
            timezone: t(&hour.timezone.name),
            open_days: hour.open_days().map(t).collect::<Vec<_>>().join(", "),
            enabled: if hour.active { t("Yes") } else { t("No") },
            removable: hour.is_removable(),
        }
    }
}

#[derive(Debug)]
pub enum BusinessHoursEvent {
    EditQuery(QueryEdit),
    /// Row click.
    Open(String),
    /// Remove button click; asks for confirmation.
    Remove(String),
    ConfirmRemove,
    CancelRemove,
    Reload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusinessHoursSnapshot {
    Loading,
    Failed {
        message: String,
    },
    Ready {
        table: TableModel<BusinessHourRow>,
        /// A refetch is running; rows are the last confirmed ones.
        refreshing: bool,
        /// Id of the row awaiting delete confirmation.
        pending_removal: Option<String>,
    },
}

pub struct BusinessHoursTableView<E = BusinessHoursList>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    source: EndpointData<E>,
    query: ListQuery,
    /// Query of the page on screen; trails `query` while a refetch runs.
    shown_query: ListQuery,
    remove: RowAction,
}

impl<E> BusinessHoursTableView<E>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    pub fn new(endpoint: E, remove: Arc<dyn RemoteMethod>, page_size: usize) -> Result<Self, ViewError> {
        let query = ListQuery::new(page_size)?;
        Ok(Self {
            source: EndpointData::new(endpoint),
            shown_query: query.clone(),
            query,
            remove: RowAction::new("Remove", true, remove),
        })
    }

    fn find(&self, id: &str) -> Option<&BusinessHour> {
        self.source
            .value()
            .and_then(|page| page.items().iter().find(|hour| hour.id == id))
    }

    fn total(&self) -> usize {
        self.source.value().map(Page::total).unwrap_or(0)
    }

    async fn confirm_remove(&mut self, ctx: &ViewContext) -> Result<(), ViewError> {
        match self.remove.execute().await {
            Ok(target) => {
                debug!(row_id = %target.id, "Business hour removed");
                ctx.toast_success("Business_Hour_Removed");
                self.source.reload();
                Ok(())
            }
            Err(ViewError::RemoteAction(e)) => {
                // The row stays; the list is not refetched.
                ctx.toast_error(e.to_string());
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}

#[async_trait]
impl<E> View for BusinessHoursTableView<E>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    type Event = BusinessHoursEvent;
    type Snapshot = BusinessHoursSnapshot;
    type Context = ViewContext;

    async fn on_mount(&mut self, _ctx: &ViewContext) -> Result<(), ViewError> {
        self.source.fetch(self.query.clone());
        Ok(())
    }

    async fn handle_event(
        &mut self,
        event: BusinessHoursEvent,
        ctx: &ViewContext,
    ) -> Result<(), ViewError> {
        match event {
            BusinessHoursEvent::EditQuery(edit) => {
                if let Some(query) = self.query.apply(&edit, self.total()) {
                    self.query = query.clone();
                    self.source.set_params(query);
                }
                Ok(())
            }
            BusinessHoursEvent::Open(id) => {
                let hour = self
                    .find(&id)
                    .ok_or_else(|| ViewError::Validation(format!("no business hour {id}")))?;
                ctx.navigator.push(
                    Route::new(EDIT_ROUTE)
                        .param("context", "edit")
                        .param("type", hour.kind.as_str())
                        .param("id", hour.id.as_str()),
                );
                Ok(())
            }
            BusinessHoursEvent::Remove(id) => {
                let hour = self
                    .find(&id)
                    .ok_or_else(|| ViewError::Validation(format!("no business hour {id}")))?;
                if !hour.is_removable() {
                    return Err(ViewError::Validation(
                        "the default business hour cannot be removed".into(),
                    ));
                }
                let target = RowTarget::new(hour.id.clone()).with_kind(hour.kind.as_str());
                match self.remove.begin(target)? {
                    Gate::Confirm => Ok(()),
                    Gate::Ready => self.confirm_remove(ctx).await,
                }
            }
            BusinessHoursEvent::ConfirmRemove => self.confirm_remove(ctx).await,
            BusinessHoursEvent::CancelRemove => {
                self.remove.cancel();
                Ok(())
            }
            BusinessHoursEvent::Reload => {
                self.source.reload();
                Ok(())
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.source.has_pending()
    }

    async fn settle(&mut self, _ctx: &ViewContext) -> bool {
        let settled = self.source.next_completion().await;
        if settled == Some(Settled::Applied(AsyncPhase::Resolved)) {
            if let Some(params) = self.source.params() {
                self.shown_query = params.clone();
            }
        }
        matches!(settled, Some(Settled::Applied(_)))
    }

    fn snapshot(&self, ctx: &ViewContext) -> BusinessHoursSnapshot {
        if let Some(error) = self.source.error() {
            return BusinessHoursSnapshot::Failed {
                message: format!("{}: {}", ctx.t("Error"), error),
            };
        }
        match self.source.value() {
            None => BusinessHoursSnapshot::Loading,
            Some(page) => {
                let presenter = TablePresenter::new(BusinessHourRows::new(ctx.translator.as_ref()));
                BusinessHoursSnapshot::Ready {
                    table: presenter.render(page, &self.shown_query),
                    refreshing: self.source.resource().is_loading(),
                    pending_removal: self.remove.pending_target().map(|target| target.id.clone()),
                }
            }
        }
    }

    fn on_unmount(&mut self) {
        self.source.unmount();
    }
}
